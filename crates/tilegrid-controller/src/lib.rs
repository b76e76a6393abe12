// Interactive grid controller
// Binds drag/resize gestures from a Presenter to the tilegrid layout and keeps
// the presenter's pixel geometry in sync with the grid after every change.

mod gesture;
mod headless;
mod metrics;

pub use gesture::ResizeTick;
pub use headless::{HeadlessPresenter, TileGeometry};
pub use metrics::CellMetrics;
pub use tilegrid_layout::{ItemPatch, SizeRequest};

use tilegrid_core::{GridOptions, Item, ItemAttributes, Presenter, Vec2};
use tilegrid_layout::GridState;

use gesture::Gesture;

/// Called with the items whose position or size changed.
pub type ChangeCallback = Box<dyn FnMut(&[Item])>;

// ──────────────────────────────────────────────
// GridController
// ──────────────────────────────────────────────

pub struct GridController<P: Presenter> {
    presenter: P,
    options: GridOptions,
    state: GridState,
    metrics: CellMetrics,
    gesture: Gesture,
    /// Item under the pointer during a drag; its pixel position is left alone.
    moving: Option<String>,
    on_change: Option<ChangeCallback>,
}

impl<P: Presenter> GridController<P> {
    /// Read the presenter's declared tiles, lay them out and render them.
    /// Gesture handlers are attached unless the grid is read-only.
    pub fn new(presenter: P, options: GridOptions) -> Self {
        if let Err(err) = options.validate() {
            log::warn!("grid options: {err}; invalid fields fall back to defaults");
        }
        let options = options.sanitized();
        let items: Vec<Item> = presenter
            .declared_items()
            .iter()
            .map(ItemAttributes::to_item)
            .collect();
        let state = GridState::new(items, options.lanes, options.direction);
        let mut controller = Self {
            presenter,
            options: GridOptions {
                lanes: state.lanes(),
                ..options
            },
            state,
            metrics: CellMetrics::default(),
            gesture: Gesture::Idle,
            moving: None,
            on_change: None,
        };
        controller.reflow();

        if !controller.options.read_only {
            for item in controller.state.items() {
                controller.presenter.bind_gestures(&item.id);
            }
        }
        log::debug!(
            "grid controller: {} items, {} lanes, {:?}",
            controller.state.items().len(),
            controller.state.lanes(),
            controller.options.direction
        );
        controller
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&[Item]) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&[Item]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        self.state.items()
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn is_gesture_in_progress(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn moving_item(&self) -> Option<&str> {
        self.moving.as_deref()
    }

    /// Detach gesture handlers. An unfinished gesture is cancelled.
    pub fn destroy(&mut self) {
        self.cancel_gesture();
        if !self.options.read_only {
            for item in self.state.items() {
                self.presenter.unbind_gestures(&item.id);
            }
        }
    }

    // ── rendering ──

    /// Recompute cell size from the container, then render.
    pub fn reflow(&mut self) {
        self.metrics = CellMetrics::compute(self.presenter.container_size(), &self.options);
        log::debug!(
            "reflow: cell {}x{}",
            self.metrics.cell_width,
            self.metrics.cell_height
        );
        self.render();
    }

    pub fn render(&mut self) {
        self.apply_size_to_items();
        self.apply_position_to_items();
    }

    fn apply_size_to_items(&mut self) {
        for item in self.state.items() {
            self.presenter
                .set_item_size(&item.id, self.metrics.item_size(item));
            if let Some(font_size) = self.metrics.font_size {
                self.presenter.set_item_font_size(&item.id, font_size);
            }
        }
    }

    fn apply_position_to_items(&mut self) {
        for item in self.state.items() {
            if self.moving.as_deref() == Some(item.id.as_str()) {
                continue;
            }
            if let Some(origin) = self.metrics.item_origin(item) {
                self.presenter.set_item_position(&item.id, origin);
            }
        }

        // Leave room past the last row so a tile can be dragged beyond it.
        let room = if self.options.read_only {
            0
        } else {
            self.state.max_scroll_span()
        };
        let direction = self.options.direction;
        let extent = (self.state.extent() + room) as f32 * self.metrics.scroll_cell(direction);
        self.presenter.set_container_extent(direction, extent);
    }

    fn highlight_position_for_item(&mut self, id: &str) {
        if let Some(rect) = self.state.item(id).and_then(|item| self.metrics.item_rect(item)) {
            self.presenter.show_highlight(rect, self.metrics.font_size);
        }
    }

    // ── mutations ──

    /// Change the lane count and repack every item.
    pub fn resize(&mut self, lanes: u32) -> bool {
        if lanes < 1 {
            log::warn!("resize: ignored lane count {lanes}");
            return false;
        }
        let applied = self.mutate("resize", |state| {
            state.resize_grid(lanes);
            true
        });
        if applied {
            self.options.lanes = lanes;
            self.reflow();
        }
        applied
    }

    pub fn position_positionless_items(&mut self) -> bool {
        let applied = self.mutate("position_positionless_items", |state| {
            state.position_positionless_items();
            true
        });
        if applied {
            self.reflow();
        }
        applied
    }

    pub fn resize_item(&mut self, id: &str, size: SizeRequest) -> bool {
        let applied = self.mutate("resize_item", |state| state.resize_item(id, size));
        if applied {
            self.render();
        }
        applied
    }

    pub fn move_and_resize_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        let applied = self.mutate("move_and_resize_item", |state| {
            state.move_and_resize_item(id, patch)
        });
        if applied {
            self.render();
        }
        applied
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let applied = self.mutate("delete_item", |state| state.delete_item(id).is_some());
        if applied {
            self.presenter.remove_item(id);
            self.render();
        }
        applied
    }

    /// Add a tile from its declared attributes. No-op if the id is already
    /// in the grid.
    pub fn add_item(&mut self, attributes: &ItemAttributes) -> bool {
        if self.state.contains(&attributes.id) {
            log::warn!("add_item: {} is already in the grid", attributes.id);
            return false;
        }
        let item = attributes.to_item();
        let applied = self.mutate("add_item", |state| state.add_item(item));
        if applied {
            self.presenter.bind_gestures(&attributes.id);
            self.render();
        }
        applied
    }

    /// Snapshot, apply `op`, then notify with whatever changed.
    fn mutate(&mut self, name: &str, op: impl FnOnce(&mut GridState) -> bool) -> bool {
        if self.options.read_only {
            log::debug!("{name}: ignored, grid is read-only");
            return false;
        }
        if self.gesture.is_active() {
            log::warn!("{name}: ignored while a gesture is in progress");
            return false;
        }
        let snapshot = self.state.snapshot();
        let applied = op(&mut self.state);
        self.notify_changes(&snapshot);
        applied
    }

    fn notify_changes(&mut self, snapshot: &[Item]) {
        let changed = self.state.changed_items(snapshot);
        if changed.is_empty() {
            return;
        }
        log::debug!("{} items changed", changed.len());
        if let Some(callback) = self.on_change.as_mut() {
            callback(&changed);
        }
    }

    // ── gestures ──

    fn begin_gesture(&mut self, name: &str, id: &str) -> bool {
        if self.options.read_only {
            return false;
        }
        if !self.state.contains(id) {
            log::warn!("{name}: unknown item {id}");
            return false;
        }
        if let Some(stale) = self.gesture.item() {
            log::warn!("{name}: cancelling unfinished gesture on {stale}");
            self.cancel_gesture();
        }
        true
    }

    pub fn drag_start(&mut self, id: &str) -> bool {
        if !self.begin_gesture("drag_start", id) {
            return false;
        }
        log::debug!("drag_start: {id}");
        self.gesture = Gesture::Dragging {
            item: id.to_string(),
            snapshot: self.state.snapshot(),
            max_scroll: self.state.extent(),
            previous: None,
        };
        self.moving = Some(id.to_string());
        true
    }

    /// Feed the dragged element's current pixel offset inside the container.
    /// Returns true when the target cell changed and the layout was updated.
    pub fn drag_move(&mut self, id: &str, position: Vec2) -> bool {
        let lanes = self.state.lanes();
        let Gesture::Dragging { item, snapshot, max_scroll, previous } = &mut self.gesture else {
            log::warn!("drag_move: no drag in progress");
            return false;
        };
        if item.as_str() != id {
            log::warn!("drag_move: {id} is not the dragged item");
            return false;
        }
        let Some(current) = self.state.item(id) else {
            return false;
        };

        let cell = gesture::snap_drag(
            position,
            &self.metrics,
            self.state.axes(),
            current,
            lanes,
            *max_scroll,
        );
        if *previous == Some(cell) {
            return false;
        }
        log::trace!("drag_move: {id} -> {:?}", cell);
        *previous = Some(cell);

        // Every tick starts over from the layout the drag began with.
        self.state.restore(snapshot);
        self.state.move_item_to_position(id, cell);

        self.apply_position_to_items();
        self.highlight_position_for_item(id);
        true
    }

    pub fn drag_stop(&mut self, id: &str) -> bool {
        if !matches!(&self.gesture, Gesture::Dragging { item, .. } if item == id) {
            log::warn!("drag_stop: {id} is not being dragged");
            return false;
        }
        let snapshot = std::mem::take(&mut self.gesture).into_snapshot().unwrap_or_default();
        log::debug!("drag_stop: {id}");

        self.moving = None;
        self.apply_position_to_items();
        self.presenter.hide_highlight();
        self.notify_changes(&snapshot);
        true
    }

    pub fn resize_start(&mut self, id: &str) -> bool {
        if !self.begin_gesture("resize_start", id) {
            return false;
        }
        log::debug!("resize_start: {id}");
        self.gesture = Gesture::Resizing {
            item: id.to_string(),
            snapshot: self.state.snapshot(),
        };
        true
    }

    pub fn resize_move(&mut self, id: &str, tick: ResizeTick) -> bool {
        let lanes = self.state.lanes();
        let Gesture::Resizing { item, snapshot } = &self.gesture else {
            log::warn!("resize_move: no resize in progress");
            return false;
        };
        if item.as_str() != id {
            log::warn!("resize_move: {id} is not the resized item");
            return false;
        }

        self.state.restore(snapshot);
        let patch = gesture::snap_resize(&tick, &self.metrics, self.options.direction, lanes);
        log::trace!("resize_move: {id} -> {:?}", patch);
        self.state.move_and_resize_item(id, patch);
        self.render();
        true
    }

    /// Apply the final handle position and commit the resize.
    pub fn resize_stop(&mut self, id: &str, tick: ResizeTick) -> bool {
        if !self.resize_move(id, tick) {
            return false;
        }
        let snapshot = std::mem::take(&mut self.gesture).into_snapshot().unwrap_or_default();
        log::debug!("resize_stop: {id}");
        self.notify_changes(&snapshot);
        true
    }

    /// Abandon the current gesture: the layout returns to how it was when the
    /// gesture began and no change is reported.
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(snapshot) = std::mem::take(&mut self.gesture).into_snapshot() else {
            return false;
        };
        log::debug!("cancel_gesture: restoring {} items", snapshot.len());
        self.state.restore(&snapshot);
        self.moving = None;
        self.presenter.hide_highlight();
        self.render();
        true
    }
}
