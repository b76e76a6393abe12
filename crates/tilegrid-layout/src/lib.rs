// Tile grid layout engine
// Items live in a list; occupancy is always regenerated from that list before
// a placement, and collisions are resolved by pushing items forward along the
// scroll axis.

mod grid;
mod snapshot;

pub use grid::Grid;
pub use snapshot::{changed_items, changed_items_by, clone_items, clone_items_into};

use tilegrid_core::{Axes, Direction, Footprint, GridPos, Item};

// ──────────────────────────────────────────────
// Requests
// ──────────────────────────────────────────────

/// New size for an item. Omitted fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeRequest {
    pub w: Option<u32>,
    pub h: Option<u32>,
}

/// New position and size for an item. Omitted fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
}

impl ItemPatch {
    pub fn size(&self) -> SizeRequest {
        SizeRequest {
            w: self.w,
            h: self.h,
        }
    }
}

// ──────────────────────────────────────────────
// GridState
// ──────────────────────────────────────────────

pub struct GridState {
    items: Vec<Item>,
    lanes: u32,
    axes: Axes,
    grid: Grid,
}

impl GridState {
    /// Build a layout from declared items. Sizes are clamped to the lanes and
    /// any overlap in the declared positions is pushed apart.
    pub fn new(items: Vec<Item>, lanes: u32, direction: Direction) -> Self {
        let lanes = checked_lanes(lanes);
        let mut state = Self {
            items,
            lanes,
            axes: Axes::new(direction),
            grid: Grid::new(lanes),
        };
        state.settle();
        state
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    pub fn direction(&self) -> Direction {
        self.axes.direction()
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bounding extent along the scroll axis: max scroll end over placed items.
    pub fn extent(&self) -> u32 {
        self.items
            .iter()
            .filter_map(|item| self.axes.footprint(item))
            .map(|fp| fp.scroll_end())
            .max()
            .unwrap_or(0)
    }

    /// Largest span along the scroll axis (the widest item when horizontal,
    /// the tallest when vertical).
    pub fn max_scroll_span(&self) -> u32 {
        self.items
            .iter()
            .map(|item| self.axes.scroll_span(item))
            .max()
            .unwrap_or(0)
    }

    /// Rebuild occupancy from the current item list.
    pub fn generate_grid(&mut self) {
        self.grid = Grid::generate(&self.items, &self.axes, self.lanes);
    }

    pub fn snapshot(&self) -> Vec<Item> {
        clone_items(&self.items)
    }

    /// Overwrite the items with `snapshot` and regenerate the grid.
    pub fn restore(&mut self, snapshot: &[Item]) {
        clone_items_into(snapshot, &mut self.items);
        self.generate_grid();
    }

    pub fn changed_items(&self, previous: &[Item]) -> Vec<Item> {
        changed_items(&self.items, previous)
    }

    /// Place the item at `pos` (lane coordinate clamped into the lanes) and push
    /// every conflicting item forward. Returns false for an unknown id.
    pub fn move_item_to_position(&mut self, id: &str, pos: GridPos) -> bool {
        let Some(index) = self.index_of(id) else {
            log::warn!("move_item_to_position: unknown item {id}");
            return false;
        };
        self.generate_grid();
        self.place_anchor(index, pos);
        true
    }

    /// Resize the item, clamped to at least one cell and at most the lane
    /// count across the lanes, then resolve whatever the growth now overlaps.
    pub fn resize_item(&mut self, id: &str, size: SizeRequest) -> bool {
        let Some(index) = self.index_of(id) else {
            log::warn!("resize_item: unknown item {id}");
            return false;
        };
        self.generate_grid();
        self.apply_size(index, size);
        if let Some(pos) = self.items[index].pos {
            self.place_anchor(index, pos);
        }
        true
    }

    pub fn move_and_resize_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            log::warn!("move_and_resize_item: unknown item {id}");
            return false;
        };
        self.generate_grid();
        self.apply_size(index, patch.size());

        let current = self.items[index].pos;
        let x = patch.x.or(current.map(|p| p.x));
        let y = patch.y.or(current.map(|p| p.y));
        match (x, y) {
            (Some(x), Some(y)) => self.place_anchor(index, GridPos::new(x, y)),
            _ => self.place_first_fit(index),
        }
        true
    }

    /// Switch to `lanes` lanes and repack every item, in list order, into the
    /// first free spot from the origin.
    pub fn resize_grid(&mut self, lanes: u32) {
        let lanes = checked_lanes(lanes);
        log::debug!("resize_grid: {} -> {} lanes, {} items", self.lanes, lanes, self.items.len());
        self.lanes = lanes;
        self.grid = Grid::new(lanes);
        for index in 0..self.items.len() {
            normalize(&mut self.items[index], &self.axes, lanes);
            self.items[index].pos = None;
            self.place_first_fit(index);
        }
    }

    /// Give every positionless item the first free spot, leaving the others
    /// where they are.
    pub fn position_positionless_items(&mut self) {
        self.generate_grid();
        for index in 0..self.items.len() {
            if !self.items[index].is_positioned() {
                self.place_first_fit(index);
            }
        }
    }

    pub fn delete_item(&mut self, id: &str) -> Option<Item> {
        let index = self.index_of(id)?;
        let removed = self.items.remove(index);
        self.generate_grid();
        log::debug!("delete_item: removed {id}");
        Some(removed)
    }

    /// Insert an item. A positioned item is anchored where it declares and
    /// pushes conflicting items away; a positionless one takes the first free
    /// spot. Returns false, changing nothing, if the id is already present.
    pub fn add_item(&mut self, mut item: Item) -> bool {
        if self.contains(&item.id) {
            log::warn!("add_item: duplicate item {}", item.id);
            return false;
        }
        normalize(&mut item, &self.axes, self.lanes);
        log::debug!("add_item: {} at {:?}", item.id, item.pos);
        self.items.push(item);
        self.generate_grid();

        let index = self.items.len() - 1;
        match self.items[index].pos {
            Some(pos) => self.place_anchor(index, pos),
            None => self.place_first_fit(index),
        }
        true
    }

    /// Clamp every item into the lanes and push apart overlapping items.
    pub fn settle(&mut self) {
        for item in &mut self.items {
            normalize(item, &self.axes, self.lanes);
        }
        self.resolve_collisions(None);
    }

    // ── internals ──

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn apply_size(&mut self, index: usize, size: SizeRequest) {
        let item = &mut self.items[index];
        item.w = size.w.unwrap_or(item.w);
        item.h = size.h.unwrap_or(item.h);
        normalize(item, &self.axes, self.lanes);
    }

    fn place_anchor(&mut self, index: usize, pos: GridPos) {
        let item = &mut self.items[index];
        item.pos = Some(pos);
        normalize(item, &self.axes, self.lanes);
        self.resolve_collisions(Some(index));
    }

    /// Put the item on the first spot of the current grid where it fits,
    /// scanning scroll rows from the origin and lanes within each row.
    fn place_first_fit(&mut self, index: usize) {
        let item = &self.items[index];
        let lane_span = self.axes.lane_span(item);
        let scroll_span = self.axes.scroll_span(item);
        let last_lane = self.lanes - lane_span;

        let mut scroll = 0;
        let fp = 'scan: loop {
            for lane in 0..=last_lane {
                let fp = Footprint { lane, scroll, lane_span, scroll_span };
                if self.grid.fits(&fp, Some(index)) {
                    break 'scan fp;
                }
            }
            scroll += 1;
        };

        self.items[index].pos = Some(self.axes.pos(fp.lane, fp.scroll));
        self.grid.mark(index, &fp);
    }

    /// Rebuild the grid with `anchor` fixed in place, then re-place every other
    /// item in (scroll, lane) order at the first offset at or after its own
    /// where it fits in its lanes. Non-conflicting items keep their position.
    fn resolve_collisions(&mut self, anchor: Option<usize>) {
        let mut grid = Grid::new(self.lanes);
        if let Some(index) = anchor {
            if let Some(fp) = self.axes.footprint(&self.items[index]) {
                grid.mark(index, &fp);
            }
        }

        let mut order: Vec<(Footprint, usize)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != anchor)
            .filter_map(|(index, item)| self.axes.footprint(item).map(|fp| (fp, index)))
            .collect();
        order.sort_by_key(|(fp, index)| (fp.scroll, fp.lane, *index));

        for (mut fp, index) in order {
            let declared = fp.scroll;
            // Rows at or past the extent are free, so the scan stops there.
            while fp.scroll < grid.extent() && !grid.fits(&fp, None) {
                fp.scroll += 1;
            }
            if fp.scroll != declared {
                log::trace!(
                    "resolve_collisions: {} pushed {} -> {}",
                    self.items[index].id,
                    declared,
                    fp.scroll
                );
                self.items[index].pos = Some(self.axes.pos(fp.lane, fp.scroll));
            }
            grid.mark(index, &fp);
        }

        self.grid = grid;
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn checked_lanes(lanes: u32) -> u32 {
    if lanes < 1 {
        log::warn!("lane count must be at least 1, using 1");
        1
    } else {
        lanes
    }
}

/// Clamp sizes to at least one cell, the lane span to the lane count and the
/// lane coordinate so the item stays inside the lanes. The scroll coordinate
/// is kept low enough that the item's far edge is still a `u32`.
fn normalize(item: &mut Item, axes: &Axes, lanes: u32) {
    item.w = item.w.max(1);
    item.h = item.h.max(1);
    let span = axes.lane_span(item).min(lanes);
    axes.set_lane_span(item, span);
    if let Some(pos) = item.pos {
        let lane = axes.lane(pos).min(lanes - span);
        let scroll = axes.scroll(pos).min(u32::MAX - axes.scroll_span(item));
        item.pos = Some(axes.pos(lane, scroll));
    }
}
