// In-memory presenter: records the geometry the controller pushes so layouts
// can be computed without a real UI (exports, server-side thumbnails, tests).

use std::collections::{BTreeMap, BTreeSet};

use tilegrid_core::{Direction, ItemAttributes, ItemId, Presenter, Rect, Size, Vec2};

/// Last geometry written to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileGeometry {
    pub position: Option<Vec2>,
    pub size: Option<Size>,
    pub font_size: Option<f32>,
}

impl TileGeometry {
    pub fn rect(&self) -> Option<Rect> {
        let (pos, size) = (self.position?, self.size?);
        Some(Rect::new(pos.x, pos.y, size.width, size.height))
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    container: Size,
    declared: Vec<ItemAttributes>,
    tiles: BTreeMap<ItemId, TileGeometry>,
    extent: Option<(Direction, f32)>,
    highlight: Option<Rect>,
    highlight_font_size: Option<f32>,
    bound: BTreeSet<ItemId>,
}

impl HeadlessPresenter {
    pub fn new(container: Size, declared: Vec<ItemAttributes>) -> Self {
        Self {
            container,
            declared,
            ..Default::default()
        }
    }

    /// Change the container size; call `reflow()` on the controller afterwards.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
    }

    pub fn tile(&self, id: &str) -> Option<&TileGeometry> {
        self.tiles.get(id)
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.tile(id).and_then(TileGeometry::rect)
    }

    /// The tile under `point`, first by id when two share an edge.
    pub fn item_at(&self, point: Vec2) -> Option<&str> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.rect().is_some_and(|r| r.contains(point)))
            .map(|(id, _)| id.as_str())
    }

    /// Container length along the scroll axis, as last set by the controller.
    pub fn container_extent(&self) -> Option<(Direction, f32)> {
        self.extent
    }

    pub fn highlight(&self) -> Option<Rect> {
        self.highlight
    }

    pub fn highlight_font_size(&self) -> Option<f32> {
        self.highlight_font_size
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.bound.contains(id)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

impl Presenter for HeadlessPresenter {
    fn container_size(&self) -> Size {
        self.container
    }

    fn declared_items(&self) -> Vec<ItemAttributes> {
        self.declared.clone()
    }

    fn set_item_size(&mut self, id: &str, size: Size) {
        self.tiles.entry(id.to_string()).or_default().size = Some(size);
    }

    fn set_item_position(&mut self, id: &str, position: Vec2) {
        self.tiles.entry(id.to_string()).or_default().position = Some(position);
    }

    fn set_item_font_size(&mut self, id: &str, font_size: f32) {
        self.tiles.entry(id.to_string()).or_default().font_size = Some(font_size);
    }

    fn set_container_extent(&mut self, direction: Direction, extent: f32) {
        self.extent = Some((direction, extent));
    }

    fn show_highlight(&mut self, rect: Rect, font_size: Option<f32>) {
        self.highlight = Some(rect);
        self.highlight_font_size = font_size;
    }

    fn hide_highlight(&mut self) {
        self.highlight = None;
    }

    fn bind_gestures(&mut self, id: &str) {
        self.bound.insert(id.to_string());
    }

    fn unbind_gestures(&mut self, id: &str) {
        self.bound.remove(id);
    }

    fn remove_item(&mut self, id: &str) {
        self.bound.remove(id);
        self.tiles.remove(id);
    }
}
