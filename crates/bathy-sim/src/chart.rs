//! Sea chart: a coarse grid that ticks off the cells where photos landed.

use std::collections::BTreeSet;

use log::debug;

use bathy_core::config::ChartConfig;
use bathy_core::state::ChartView;
use bathy_core::types::DVec2;

use crate::observer::DiveObserver;

#[derive(Debug, Clone)]
pub struct SeaChart {
    config: ChartConfig,
    marked: BTreeSet<(u32, u32)>,
}

impl SeaChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            marked: BTreeSet::new(),
        }
    }

    /// The grid cell whose node is nearest `coordinates`, if it lies within
    /// half a step.
    pub fn nearest_cell(&self, coordinates: DVec2) -> Option<(u32, u32)> {
        let c = &self.config;
        let grid = (coordinates - c.origin) / c.step;
        let col = grid.x.round();
        let row = grid.y.round();
        if col < 0.0 || row < 0.0 || col >= c.width as f64 || row >= c.height as f64 {
            return None;
        }
        let node = c.origin + DVec2::new(col, row) * c.step;
        if node.distance(coordinates) < c.step * 0.5 {
            Some((col as u32, row as u32))
        } else {
            None
        }
    }

    /// Mark the cell nearest `coordinates`. Returns the cell if one was marked.
    pub fn mark(&mut self, coordinates: DVec2) -> Option<(u32, u32)> {
        let cell = self.nearest_cell(coordinates);
        match cell {
            Some(cell) => {
                self.marked.insert(cell);
            }
            None => debug!(
                "({:.1}, {:.1}) is off the chart",
                coordinates.x, coordinates.y
            ),
        }
        cell
    }

    pub fn is_marked(&self, cell: (u32, u32)) -> bool {
        self.marked.contains(&cell)
    }

    pub fn clear(&mut self) {
        self.marked.clear();
    }

    pub fn view(&self) -> ChartView {
        ChartView {
            width: self.config.width,
            height: self.config.height,
            marked: self.marked.iter().copied().collect(),
        }
    }
}

impl DiveObserver for SeaChart {
    fn on_target_captured(&mut self, _target_id: u32, coordinates: DVec2) {
        self.mark(coordinates);
    }
}
