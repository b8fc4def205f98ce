pub mod lifecycle;
pub mod metrics;

pub use lifecycle::PickUp;
pub use metrics::*;

use crate::config::{ConfigError, WorldConfig};
use crate::dispersal::DispersalPolicy;
use crate::food::{FoodSites, FoodSource};
use crate::pheromone::{self, Cell, PheromoneField};
use crate::position::Position;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};
use tracing::info;

/// Shared environment for a stepped ant simulation: two pheromone fields, the
/// active food sources and the food-presence index derived from them.
pub struct WorldGrid {
    pub(crate) config: WorldConfig,
    pub(crate) foraging: PheromoneField,
    pub(crate) food_scent: PheromoneField,
    pub(crate) food: FoodSites,
    /// Placed obstacles, row-major like the pheromone fields.
    pub(crate) obstacles: Vec<bool>,
    pub(crate) policy: Box<dyn DispersalPolicy>,
    pub(crate) rng: ChaCha12Rng,
    pub(crate) food_delivered: u64,
    /// Reused by the dispersal sweep; swapped with the live fields on commit.
    pub(crate) scratch_foraging: Vec<f32>,
    pub(crate) scratch_food: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(ConfigError),
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl From<ConfigError> for WorldInitError {
    fn from(err: ConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    OutOfBounds { x: f64, y: f64 },
    NoFoodSources,
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::OutOfBounds { x, y } => {
                write!(f, "position ({x}, {y}) lies outside the grid")
            }
            WorldError::NoFoodSources => write!(f, "world has no active food sources"),
        }
    }
}

impl Error for WorldError {}

pub(crate) fn random_cell_position<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
) -> Position {
    let x = rng.random_range(0..width);
    let y = rng.random_range(0..height);
    Position::new(x as f64, y as f64)
}

impl WorldGrid {
    /// Largest contribution of a single pheromone drop.
    pub const MAX_DROP: f32 = 1.0;

    pub fn new(config: WorldConfig, policy: impl DispersalPolicy + 'static) -> Self {
        Self::try_new(config, policy).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(
        config: WorldConfig,
        policy: impl DispersalPolicy + 'static,
    ) -> Result<Self, WorldInitError> {
        config.validate()?;
        let (width, height) = (config.width, config.height);

        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let mut food = FoodSites::new(width, height);
        for _ in 0..config.initial_food_sources {
            let position = random_cell_position(&mut rng, width, height);
            food.insert(position, config.food_source_radius, config.food_source_units);
        }
        info!(
            width,
            height,
            food_sources = food.len(),
            seed = config.seed,
            "world created"
        );

        Ok(Self {
            foraging: PheromoneField::new(width, height),
            food_scent: PheromoneField::new(width, height),
            food,
            obstacles: vec![false; width * height],
            policy: Box::new(policy),
            rng,
            food_delivered: 0,
            scratch_foraging: vec![0.0; width * height],
            scratch_food: vec![0.0; width * height],
            config,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    fn cell(&self, p: &Position) -> Option<Cell> {
        pheromone::cell_at(self.width(), self.height(), p)
    }

    pub(crate) fn checked_cell(&self, p: &Position) -> Result<Cell, WorldError> {
        self.cell(p).ok_or(WorldError::OutOfBounds { x: p.x(), y: p.y() })
    }

    /// True outside `[0, width) x [0, height)` and on cells marked with `set_obstacle`.
    pub fn is_obstacle(&self, p: &Position) -> bool {
        self.cell(p).is_none_or(|cell| self.is_obstacle_cell(cell))
    }

    pub(crate) fn is_obstacle_cell(&self, cell: Cell) -> bool {
        self.obstacles[cell.y * self.width() + cell.x]
    }

    /// Place (`add == true`) or clear an obstacle on the cell containing `p`.
    /// Ignored outside the grid.
    pub fn set_obstacle(&mut self, p: &Position, add: bool) {
        if let Some(cell) = self.cell(p) {
            let width = self.width();
            self.obstacles[cell.y * width + cell.x] = add;
        }
    }

    /// Home is a half-disc around `(width, height / 2)` on the right edge.
    pub fn is_home(&self, p: &Position) -> bool {
        let anchor = Position::new(self.width() as f64, self.height() as f64 / 2.0);
        anchor.is_within_radius(p, self.config.home_radius)
    }

    pub fn foraging_strength(&self, p: &Position) -> f32 {
        self.foraging.get(p)
    }

    pub fn food_strength(&self, p: &Position) -> f32 {
        self.food_scent.get(p)
    }

    /// Whether the cell containing `p` lies within reach of an active food source.
    pub fn contains_food(&self, p: &Position) -> Result<bool, WorldError> {
        let cell = self.checked_cell(p)?;
        Ok(self.food.contains(cell))
    }

    /// Adds `min(amount, 1.0)` to the foraging trail. Ignored outside the grid.
    pub fn drop_foraging_pheromone(&mut self, p: &Position, amount: f32) {
        if let Some(cell) = self.cell(p) {
            self.foraging.add(cell, amount.min(Self::MAX_DROP));
        }
    }

    /// Overwrites the food scent with `min(amount, 1.0)`. Ignored outside the grid.
    pub fn drop_food_pheromone(&mut self, p: &Position, amount: f32) {
        if let Some(cell) = self.cell(p) {
            self.food_scent.set(cell, amount.min(Self::MAX_DROP));
        }
    }

    /// Total food units delivered home so far.
    pub fn food_count(&self) -> u64 {
        self.food_delivered
    }

    /// Active food sources, oldest first.
    pub fn food_sources(&self) -> &[FoodSource] {
        self.food.sources()
    }

    pub fn foraging_field(&self) -> &PheromoneField {
        &self.foraging
    }

    pub fn food_scent_field(&self) -> &PheromoneField {
        &self.food_scent
    }
}
