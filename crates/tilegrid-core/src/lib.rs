mod options;
mod tests;

pub use options::{GridOptions, OptionsError};

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type ItemId = String;

// ──────────────────────────────────────────────
// Grid items
// ──────────────────────────────────────────────

/// Top-left corner of an item, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A rectangle placed on the integer grid.
///
/// An item without a position is "positionless": it takes no cells until the
/// layout assigns it the first free spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub pos: Option<GridPos>,
    pub w: u32,
    pub h: u32,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            pos: Some(GridPos::new(x, y)),
            w,
            h,
        }
    }

    pub fn positionless(id: impl Into<ItemId>, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            pos: None,
            w,
            h,
        }
    }

    pub fn is_positioned(&self) -> bool {
        self.pos.is_some()
    }

    /// True when position and size are identical (ids are not compared).
    pub fn same_geometry(&self, other: &Item) -> bool {
        self.pos == other.pos && self.w == other.w && self.h == other.h
    }
}

// ──────────────────────────────────────────────
// Axes
// ──────────────────────────────────────────────

/// Which way the grid grows. The other axis is split into a fixed number of lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lanes are rows (`y`), the grid grows to the right along `x`.
    Horizontal,
    /// Lanes are columns (`x`), the grid grows downwards along `y`.
    #[default]
    Vertical,
}

/// An item's rectangle expressed in lane/scroll coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub lane: u32,
    pub scroll: u32,
    pub lane_span: u32,
    pub scroll_span: u32,
}

impl Footprint {
    pub fn lane_end(&self) -> u32 {
        self.lane.saturating_add(self.lane_span)
    }

    pub fn scroll_end(&self) -> u32 {
        self.scroll.saturating_add(self.scroll_span)
    }

    pub fn overlaps(&self, other: &Footprint) -> bool {
        !(other.lane >= self.lane_end()
            || other.lane_end() <= self.lane
            || other.scroll >= self.scroll_end()
            || other.scroll_end() <= self.scroll)
    }
}

/// Axis accessors resolved once from a [`Direction`], so the layout code reads
/// in lane/scroll terms and never branches on the direction itself.
#[derive(Debug, Clone, Copy)]
pub struct Axes {
    direction: Direction,
    lane_of: fn(GridPos) -> u32,
    scroll_of: fn(GridPos) -> u32,
    lane_span_of: fn(&Item) -> u32,
    scroll_span_of: fn(&Item) -> u32,
    set_lane_span: fn(&mut Item, u32),
    compose: fn(u32, u32) -> GridPos,
}

impl Axes {
    pub fn new(direction: Direction) -> Self {
        match direction {
            Direction::Horizontal => Self {
                direction,
                lane_of: |p| p.y,
                scroll_of: |p| p.x,
                lane_span_of: |i| i.h,
                scroll_span_of: |i| i.w,
                set_lane_span: |i, v| i.h = v,
                compose: |lane, scroll| GridPos::new(scroll, lane),
            },
            Direction::Vertical => Self {
                direction,
                lane_of: |p| p.x,
                scroll_of: |p| p.y,
                lane_span_of: |i| i.w,
                scroll_span_of: |i| i.h,
                set_lane_span: |i, v| i.w = v,
                compose: |lane, scroll| GridPos::new(lane, scroll),
            },
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn lane(&self, pos: GridPos) -> u32 {
        (self.lane_of)(pos)
    }

    pub fn scroll(&self, pos: GridPos) -> u32 {
        (self.scroll_of)(pos)
    }

    pub fn lane_span(&self, item: &Item) -> u32 {
        (self.lane_span_of)(item)
    }

    pub fn scroll_span(&self, item: &Item) -> u32 {
        (self.scroll_span_of)(item)
    }

    pub fn set_lane_span(&self, item: &mut Item, span: u32) {
        (self.set_lane_span)(item, span)
    }

    /// Build a grid position from lane and scroll coordinates.
    pub fn pos(&self, lane: u32, scroll: u32) -> GridPos {
        (self.compose)(lane, scroll)
    }

    /// The item's footprint at `pos`, regardless of where it currently sits.
    pub fn footprint_at(&self, item: &Item, pos: GridPos) -> Footprint {
        Footprint {
            lane: self.lane(pos),
            scroll: self.scroll(pos),
            lane_span: self.lane_span(item),
            scroll_span: self.scroll_span(item),
        }
    }

    /// The item's current footprint, or `None` if it is positionless.
    pub fn footprint(&self, item: &Item) -> Option<Footprint> {
        item.pos.map(|pos| self.footprint_at(item, pos))
    }
}

// ──────────────────────────────────────────────
// Declared attributes
// ──────────────────────────────────────────────

/// Raw `data-*` attribute values a presentation element declares for its tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub id: ItemId,
    pub x: Option<String>,
    pub y: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
}

impl ItemAttributes {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x.to_string());
        self.y = Some(y.to_string());
        self
    }

    pub fn sized(mut self, w: u32, h: u32) -> Self {
        self.w = Some(w.to_string());
        self.h = Some(h.to_string());
        self
    }

    /// Parse into an item. Only the leading digits of each value count, so
    /// `"2.5"` reads as 2 and `"3px"` as 3. Missing or malformed coordinates
    /// make it positionless; a missing or malformed size counts as one cell.
    pub fn to_item(&self) -> Item {
        let coord = |raw: &Option<String>| raw.as_deref().and_then(leading_integer);
        let span = |raw: &Option<String>| coord(raw).unwrap_or(1).max(1);
        let pos = match (coord(&self.x), coord(&self.y)) {
            (Some(x), Some(y)) => Some(GridPos::new(x, y)),
            _ => None,
        };
        Item {
            id: self.id.clone(),
            pos,
            w: span(&self.w),
            h: span(&self.h),
        }
    }
}

fn leading_integer(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    raw[..digits].parse().ok()
}

// ──────────────────────────────────────────────
// Trait: Presenter
// ──────────────────────────────────────────────

/// The presentation layer hosting the tiles: DOM nodes, canvas sprites,
/// or props in a virtual tree. Elements are addressed by item id.
pub trait Presenter {
    /// Current pixel size of the grid container.
    fn container_size(&self) -> Size;
    /// Attributes of every tile element present at construction, in document order.
    fn declared_items(&self) -> Vec<ItemAttributes>;
    fn set_item_size(&mut self, id: &str, size: Size);
    fn set_item_position(&mut self, id: &str, position: Vec2);
    fn set_item_font_size(&mut self, id: &str, font_size: f32);
    /// Grow the container along the scroll axis to `extent` pixels.
    fn set_container_extent(&mut self, direction: Direction, extent: f32);
    /// Show the drop-target outline.
    fn show_highlight(&mut self, rect: Rect, font_size: Option<f32>);
    fn hide_highlight(&mut self);
    /// Attach drag and resize handlers to the element.
    fn bind_gestures(&mut self, id: &str);
    fn unbind_gestures(&mut self, id: &str);
    /// The item left the grid; drop whatever the presenter holds for it.
    fn remove_item(&mut self, id: &str);
}
