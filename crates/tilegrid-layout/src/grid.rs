use std::collections::BTreeMap;

use tilegrid_core::{Axes, Footprint, Item};

// ──────────────────────────────────────────────
// Grid: occupancy derived from the item list
// ──────────────────────────────────────────────

/// Sparse occupancy array indexed `[scroll][lane]`, each cell holding the
/// index of the item covering it. Only rows touched by an item are stored;
/// every other row is free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    lanes: u32,
    rows: BTreeMap<u32, Vec<Option<usize>>>,
}

impl Grid {
    pub fn new(lanes: u32) -> Self {
        Self {
            lanes,
            rows: BTreeMap::new(),
        }
    }

    /// Rebuild occupancy from scratch, marking items in list order.
    /// Positionless items take no cells.
    pub fn generate(items: &[Item], axes: &Axes, lanes: u32) -> Self {
        let mut grid = Self::new(lanes);
        for (index, item) in items.iter().enumerate() {
            if let Some(fp) = axes.footprint(item) {
                grid.mark(index, &fp);
            }
        }
        grid
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    /// One past the last occupied row along the scroll axis.
    pub fn extent(&self) -> u32 {
        self.rows
            .keys()
            .next_back()
            .map_or(0, |last| last.saturating_add(1))
    }

    /// Rows actually stored.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn occupant(&self, lane: u32, scroll: u32) -> Option<usize> {
        self.rows
            .get(&scroll)
            .and_then(|row| row.get(lane as usize).copied().flatten())
    }

    /// Whether `fp` lies inside the lanes and covers no cell owned by an item
    /// other than `ignore`.
    pub fn fits(&self, fp: &Footprint, ignore: Option<usize>) -> bool {
        if fp.lane_end() > self.lanes {
            return false;
        }
        let lanes = fp.lane as usize..fp.lane_end() as usize;
        !self
            .rows
            .range(fp.scroll..fp.scroll_end())
            .flat_map(|(_, row)| &row[lanes.clone()])
            .any(|cell| matches!(cell, Some(owner) if Some(*owner) != ignore))
    }

    pub(crate) fn mark(&mut self, index: usize, fp: &Footprint) {
        let lane_end = fp.lane_end().min(self.lanes);
        let lane = fp.lane.min(lane_end);
        if lane == lane_end {
            return;
        }
        let width = self.lanes as usize;
        for scroll in fp.scroll..fp.scroll_end() {
            let row = self.rows.entry(scroll).or_insert_with(|| vec![None; width]);
            for cell in &mut row[lane as usize..lane_end as usize] {
                *cell = Some(index);
            }
        }
    }
}
