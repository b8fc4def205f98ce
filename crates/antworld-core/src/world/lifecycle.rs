use super::metrics::DispersalTimings;
use super::{random_cell_position, WorldError, WorldGrid};
use crate::pheromone::Cell;
use crate::position::Position;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Result of a single successful pickup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickUp {
    /// Source the unit was taken from.
    pub source_id: u64,
    /// Units left in that source after the pickup.
    pub remaining: u32,
    /// Id of the source placed when this pickup emptied the old one.
    pub replacement: Option<u64>,
}

impl WorldGrid {
    /// Take one unit from the food source nearest to `p`.
    ///
    /// Equally near sources resolve to the oldest one. A source emptied by this
    /// call is removed and a full replacement is placed at a random cell before
    /// returning, so the number of active sources never changes.
    pub fn pick_up_food(&mut self, p: &Position) -> Result<PickUp, WorldError> {
        self.checked_cell(p)?;
        let source_id = self.food.nearest(p).ok_or(WorldError::NoFoodSources)?;
        let remaining = self
            .food
            .take_unit(source_id)
            .ok_or(WorldError::NoFoodSources)?;

        let replacement = (remaining == 0).then(|| self.replace_source(source_id));
        Ok(PickUp {
            source_id,
            remaining,
            replacement,
        })
    }

    fn replace_source(&mut self, depleted: u64) -> u64 {
        self.food.remove(depleted);
        let (width, height) = (self.width(), self.height());
        let position = random_cell_position(&mut self.rng, width, height);
        let id = self.food.insert(
            position,
            self.config.food_source_radius,
            self.config.food_source_units,
        );
        debug!(
            depleted,
            replacement = id,
            x = position.x(),
            y = position.y(),
            "food source depleted and replaced"
        );
        id
    }

    /// Record one unit of food delivered home. `p` carries no weight yet.
    pub fn drop_food(&mut self, p: &Position) {
        self.food_delivered += 1;
        trace!(x = p.x(), y = p.y(), total = self.food_delivered, "food delivered");
    }

    /// Mark every active source with a full-strength food scent.
    pub fn emit_food_scent(&mut self) {
        for source in self.food.sources() {
            if let Some(cell) = self.food_scent.cell(&source.position()) {
                self.food_scent.set(cell, Self::MAX_DROP);
            }
        }
    }

    /// Advance both pheromone fields by one dispersal step.
    ///
    /// Every cell's next values are computed from the pre-step fields into
    /// scratch buffers; the buffers become the live fields only after the whole
    /// sweep, so no cell sees a neighbour's updated value. Obstacle cells are
    /// reset to zero.
    pub fn disperse_pheromones(&mut self) -> DispersalTimings {
        let total_start = Instant::now();
        let width = self.width();
        let cells = width * self.height();
        let mut next_foraging = std::mem::take(&mut self.scratch_foraging);
        let mut next_food = std::mem::take(&mut self.scratch_food);
        // A policy that panicked mid-sweep leaves the taken buffers behind.
        if next_foraging.len() != cells {
            next_foraging = vec![0.0; cells];
        }
        if next_food.len() != cells {
            next_food = vec![0.0; cells];
        }

        let t0 = Instant::now();
        {
            let world: &WorldGrid = self;
            next_foraging
                .par_chunks_mut(width)
                .zip(next_food.par_chunks_mut(width))
                .enumerate()
                .for_each(|(y, (foraging_row, food_row))| {
                    for (x, (foraging, food)) in
                        foraging_row.iter_mut().zip(food_row.iter_mut()).enumerate()
                    {
                        let cell = Cell::new(x, y);
                        let (f, d) = if world.is_obstacle_cell(cell) {
                            (0.0, 0.0)
                        } else {
                            world.policy.next_values(world, cell)
                        };
                        *foraging = f;
                        *food = d;
                    }
                });
        }
        let sweep_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        self.foraging.swap_data(&mut next_foraging);
        self.food_scent.swap_data(&mut next_food);
        self.scratch_foraging = next_foraging;
        self.scratch_food = next_food;
        let commit_us = t1.elapsed().as_micros() as u64;

        trace!(sweep_us, commit_us, "pheromones dispersed");
        DispersalTimings {
            sweep_us,
            commit_us,
            total_us: total_start.elapsed().as_micros() as u64,
        }
    }
}
