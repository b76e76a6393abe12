use tilegrid_core::{Axes, Direction, GridPos, Item, ItemId, Size, Vec2};
use tilegrid_layout::ItemPatch;

use crate::metrics::CellMetrics;

/// The resize handle reports the element's inner size; this makes up for the
/// border and margin so a handle dropped on a cell edge rounds up to it.
const RESIZE_SLOP: f32 = 6.0;

// ──────────────────────────────────────────────
// Gesture state machine
// ──────────────────────────────────────────────

#[derive(Debug, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
        /// Items as they were when the drag began.
        snapshot: Vec<Item>,
        /// Furthest scroll offset the item may be dropped at.
        max_scroll: u32,
        previous: Option<GridPos>,
    },
    Resizing {
        item: ItemId,
        snapshot: Vec<Item>,
    },
}

impl Gesture {
    pub(crate) fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }

    pub(crate) fn item(&self) -> Option<&str> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { item, .. } | Gesture::Resizing { item, .. } => Some(item),
        }
    }

    pub(crate) fn into_snapshot(self) -> Option<Vec<Item>> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { snapshot, .. } | Gesture::Resizing { snapshot, .. } => {
                Some(snapshot)
            }
        }
    }
}

/// One pointer-move report from a resize handle, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTick {
    pub size: Size,
    pub position: Vec2,
    /// Where the element's top-left corner was when the resize began.
    pub original_position: Vec2,
}

impl ResizeTick {
    pub fn new(size: Size, position: Vec2, original_position: Vec2) -> Self {
        Self {
            size,
            position,
            original_position,
        }
    }
}

// ──────────────────────────────────────────────
// Snapping
// ──────────────────────────────────────────────

/// Round the dragged element's pixel offset to a cell, keeping the item
/// inside the lanes and no further along the scroll axis than `max_scroll`.
pub(crate) fn snap_drag(
    position: Vec2,
    metrics: &CellMetrics,
    axes: &Axes,
    item: &Item,
    lanes: u32,
    max_scroll: u32,
) -> GridPos {
    let col = CellMetrics::cells(position.x, metrics.cell_width).max(0) as u32;
    let row = CellMetrics::cells(position.y, metrics.cell_height).max(0) as u32;
    let raw = GridPos::new(col, row);

    let lane = axes.lane(raw).min(lanes.saturating_sub(axes.lane_span(item)));
    let scroll = axes.scroll(raw).min(max_scroll);
    axes.pos(lane, scroll)
}

/// Turn a resize handle report into a target rectangle in cells.
pub(crate) fn snap_resize(
    tick: &ResizeTick,
    metrics: &CellMetrics,
    direction: Direction,
    lanes: u32,
) -> ItemPatch {
    let (cw, ch) = (metrics.cell_width, metrics.cell_height);
    let mut w = CellMetrics::cells(tick.size.width + RESIZE_SLOP, cw);
    let mut h = CellMetrics::cells(tick.size.height + RESIZE_SLOP, ch);
    let mut x = CellMetrics::cells(tick.position.x, cw);
    let mut y = CellMetrics::cells(tick.position.y, ch);

    // Collapsed past the minimum: keep one cell, and if the leading edge was
    // dragged forward, stay on the cell it is in rather than the nearest one.
    if w <= 0 {
        w = 1;
        if tick.position.x > tick.original_position.x {
            x = CellMetrics::cells_floor(tick.position.x, cw);
        }
    }
    if h <= 0 {
        h = 1;
        if tick.position.y > tick.original_position.y {
            y = CellMetrics::cells_floor(tick.position.y, ch);
        }
    }

    let (lane, span) = match direction {
        Direction::Horizontal => (&mut y, &mut h),
        Direction::Vertical => (&mut x, &mut w),
    };
    let overflow = *lane + *span - lanes as i64;
    if overflow > 0 {
        *lane -= overflow;
        if *lane < 0 {
            *span += *lane;
        }
    }

    ItemPatch {
        x: Some(x.max(0) as u32),
        y: Some(y.max(0) as u32),
        w: Some(w.max(1) as u32),
        h: Some(h.max(1) as u32),
    }
}
