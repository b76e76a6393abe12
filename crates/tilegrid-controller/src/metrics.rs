use tilegrid_core::{Direction, GridOptions, Item, Rect, Size, Vec2};

// ──────────────────────────────────────────────
// Cell metrics: grid cells to pixels
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
    pub font_size: Option<f32>,
}

impl CellMetrics {
    /// Split the container's lane axis into whole-pixel cells and derive the
    /// other side from the width:height ratio.
    pub fn compute(container: Size, options: &GridOptions) -> Self {
        let lanes = options.lanes.max(1) as f32;
        let ratio = options.width_height_ratio;
        let (cell_width, cell_height) = match options.direction {
            Direction::Horizontal => {
                let h = (container.height / lanes).floor();
                (h * ratio, h)
            }
            Direction::Vertical => {
                let w = (container.width / lanes).floor();
                (w, w / ratio)
            }
        };
        Self {
            cell_width,
            cell_height,
            font_size: options.height_to_font_size_ratio.map(|r| cell_height * r),
        }
    }

    pub fn item_size(&self, item: &Item) -> Size {
        Size::new(
            item.w as f32 * self.cell_width,
            item.h as f32 * self.cell_height,
        )
    }

    /// Pixel offset of the item's top-left corner; `None` while positionless.
    pub fn item_origin(&self, item: &Item) -> Option<Vec2> {
        item.pos.map(|pos| {
            Vec2::new(
                pos.x as f32 * self.cell_width,
                pos.y as f32 * self.cell_height,
            )
        })
    }

    pub fn item_rect(&self, item: &Item) -> Option<Rect> {
        let origin = self.item_origin(item)?;
        let size = self.item_size(item);
        Some(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    /// Pixel length of one cell along the scroll axis.
    pub fn scroll_cell(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Horizontal => self.cell_width,
            Direction::Vertical => self.cell_height,
        }
    }

    /// Whole cells covered by `px` along an axis whose cells are `cell` wide.
    pub(crate) fn cells(px: f32, cell: f32) -> i64 {
        if cell > 0.0 {
            (px / cell).round() as i64
        } else {
            0
        }
    }

    pub(crate) fn cells_floor(px: f32, cell: f32) -> i64 {
        if cell > 0.0 {
            (px / cell).floor() as i64
        } else {
            0
        }
    }
}
