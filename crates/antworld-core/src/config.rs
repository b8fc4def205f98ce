use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Deterministic seed for food source placement.
    pub seed: u64,
    /// Grid extent along x, in cells.
    pub width: usize,
    /// Grid extent along y, in cells.
    pub height: usize,
    /// Number of food sources placed at construction. Must be at least 1.
    pub initial_food_sources: usize,
    /// Capture radius of every food source, in cells.
    pub food_source_radius: f64,
    /// Units a freshly placed food source holds.
    pub food_source_units: u32,
    /// Radius of the home half-disc on the right edge.
    pub home_radius: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 200,
            height: 200,
            initial_food_sources: 3,
            food_source_radius: 20.0,
            food_source_units: 2000,
            home_radius: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroExtent { width: usize, height: usize },
    ExtentTooLarge { max: usize, width: usize, height: usize },
    NoFoodSources,
    InvalidFoodRadius(f64),
    ZeroFoodUnits,
    InvalidHomeRadius(f64),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroExtent { width, height } => {
                write!(f, "grid extents must be positive (got {width}x{height})")
            }
            ConfigError::ExtentTooLarge { max, width, height } => write!(
                f,
                "grid extents ({width}x{height}) exceed supported maximum ({max})"
            ),
            ConfigError::NoFoodSources => {
                write!(f, "initial_food_sources must be at least 1")
            }
            ConfigError::InvalidFoodRadius(r) => {
                write!(f, "food_source_radius must be finite and positive (got {r})")
            }
            ConfigError::ZeroFoodUnits => write!(f, "food_source_units must be positive"),
            ConfigError::InvalidHomeRadius(r) => {
                write!(f, "home_radius must be finite and non-negative (got {r})")
            }
            ConfigError::Parse(msg) => write!(f, "invalid world config: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl WorldConfig {
    pub const MAX_GRID_EXTENT: usize = 4096;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroExtent {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > Self::MAX_GRID_EXTENT || self.height > Self::MAX_GRID_EXTENT {
            return Err(ConfigError::ExtentTooLarge {
                max: Self::MAX_GRID_EXTENT,
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_food_sources == 0 {
            return Err(ConfigError::NoFoodSources);
        }
        if !self.food_source_radius.is_finite() || self.food_source_radius <= 0.0 {
            return Err(ConfigError::InvalidFoodRadius(self.food_source_radius));
        }
        if self.food_source_units == 0 {
            return Err(ConfigError::ZeroFoodUnits);
        }
        if !self.home_radius.is_finite() || self.home_radius < 0.0 {
            return Err(ConfigError::InvalidHomeRadius(self.home_radius));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_extent() {
        let config = WorldConfig {
            width: 0,
            ..WorldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroExtent {
                width: 0,
                height: 200
            })
        );
    }

    #[test]
    fn rejects_world_without_food() {
        let config = WorldConfig {
            initial_food_sources: 0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoFoodSources));
    }

    #[test]
    fn rejects_non_finite_radius() {
        let config = WorldConfig {
            food_source_radius: f64::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFoodRadius(_))
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = WorldConfig::from_json(r#"{"width": 64, "seed": 7}"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.seed, 7);
        assert_eq!(config.height, WorldConfig::default().height);
    }

    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = WorldConfig::from_json(r#"{"food_source_units": 0}"#).unwrap_err();
        assert_eq!(err, ConfigError::ZeroFoodUnits);
        assert!(matches!(
            WorldConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
