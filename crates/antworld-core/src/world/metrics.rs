use super::WorldGrid;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default)]
pub struct DispersalTimings {
    pub sweep_us: u64,
    pub commit_us: u64,
    pub total_us: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WorldStats {
    pub width: usize,
    pub height: usize,
    pub food_delivered: u64,
    pub active_food_sources: usize,
    pub remaining_food: u64,
    pub food_cells: usize,
    pub foraging_total: f64,
    pub food_scent_total: f64,
}

impl WorldGrid {
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            width: self.width(),
            height: self.height(),
            food_delivered: self.food_delivered,
            active_food_sources: self.food.len(),
            remaining_food: self.food.remaining_units(),
            food_cells: self.food.present_cells(),
            foraging_total: self.foraging.total(),
            food_scent_total: self.food_scent.total(),
        }
    }
}
