pub mod config;
pub mod dispersal;
pub mod food;
pub mod pheromone;
pub mod position;
pub mod spatial;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use dispersal::{DispersalError, DispersalPolicy, NeighborhoodDispersal};
pub use food::FoodSource;
pub use pheromone::{Cell, PheromoneField};
pub use position::Position;
pub use world::{DispersalTimings, PickUp, WorldError, WorldGrid, WorldInitError, WorldStats};
