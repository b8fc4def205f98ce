use crate::pheromone::Cell;
use crate::position::Position;
use crate::world::WorldGrid;
use std::{error::Error, fmt};

/// Diffusion kernel applied once per in-bounds cell per dispersal step.
///
/// Implementations must be pure functions of the world's current field values:
/// the world calls them from several threads while holding a shared borrow and
/// commits the results only after every cell has been computed.
pub trait DispersalPolicy: Send + Sync {
    /// Returns `(next_foraging, next_food)` for `cell`.
    fn next_values(&self, world: &WorldGrid, cell: Cell) -> (f32, f32);
}

impl<F> DispersalPolicy for F
where
    F: Fn(&WorldGrid, Cell) -> (f32, f32) + Send + Sync,
{
    fn next_values(&self, world: &WorldGrid, cell: Cell) -> (f32, f32) {
        self(world, cell)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispersalError {
    InvalidFraction(f32),
    InvalidEvaporation(f32),
}

impl fmt::Display for DispersalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispersalError::InvalidFraction(v) => {
                write!(f, "fraction must be within [0, 0.25] (got {v})")
            }
            DispersalError::InvalidEvaporation(v) => {
                write!(f, "evaporation must be within [0, 1] (got {v})")
            }
        }
    }
}

impl Error for DispersalError {}

/// Four-neighbour diffusion with uniform evaporation.
///
/// Each neighbour receives `fraction` of a cell's value and the cell keeps
/// `1 - 4 * fraction`; the sum is then scaled by `1 - evaporation`.
/// Neighbours outside the grid read as zero, so mass leaks off the edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborhoodDispersal {
    fraction: f32,
    evaporation: f32,
}

impl Default for NeighborhoodDispersal {
    fn default() -> Self {
        Self {
            fraction: 0.1,
            evaporation: 0.01,
        }
    }
}

impl NeighborhoodDispersal {
    pub fn new(fraction: f32, evaporation: f32) -> Result<Self, DispersalError> {
        if !(0.0..=0.25).contains(&fraction) {
            return Err(DispersalError::InvalidFraction(fraction));
        }
        if !(0.0..=1.0).contains(&evaporation) {
            return Err(DispersalError::InvalidEvaporation(evaporation));
        }
        Ok(Self {
            fraction,
            evaporation,
        })
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn evaporation(&self) -> f32 {
        self.evaporation
    }

    fn blend(&self, center: f32, neighbors: f32) -> f32 {
        let mixed = (1.0 - 4.0 * self.fraction) * center + self.fraction * neighbors;
        mixed * (1.0 - self.evaporation)
    }
}

impl DispersalPolicy for NeighborhoodDispersal {
    fn next_values(&self, world: &WorldGrid, cell: Cell) -> (f32, f32) {
        let center = cell.position();
        let (x, y) = (center.x(), center.y());
        let neighbors = [
            Position::new(x - 1.0, y),
            Position::new(x + 1.0, y),
            Position::new(x, y - 1.0),
            Position::new(x, y + 1.0),
        ];
        let (mut foraging, mut food) = (0.0f32, 0.0f32);
        for n in &neighbors {
            foraging += world.foraging_strength(n);
            food += world.food_strength(n);
        }
        (
            self.blend(world.foraging_strength(&center), foraging),
            self.blend(world.food_strength(&center), food),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_parameters() {
        assert_eq!(
            NeighborhoodDispersal::new(0.3, 0.0),
            Err(DispersalError::InvalidFraction(0.3))
        );
        assert_eq!(
            NeighborhoodDispersal::new(0.1, -0.5),
            Err(DispersalError::InvalidEvaporation(-0.5))
        );
        assert!(NeighborhoodDispersal::new(f32::NAN, 0.0).is_err());
    }

    #[test]
    fn blend_conserves_mass_without_evaporation() {
        let policy = NeighborhoodDispersal::new(0.25, 0.0).unwrap();
        assert!((policy.blend(1.0, 0.0) - 0.0).abs() < f32::EPSILON);
        assert!((policy.blend(0.0, 1.0) - 0.25).abs() < f32::EPSILON);
    }
}
