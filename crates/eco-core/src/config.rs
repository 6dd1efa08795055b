//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Which movement strategies the entity factory binds to animals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStyle {
    /// Flee/seek behavior per kind
    Smart,
    /// Every animal wanders randomly
    Random,
}

/// Search radii used by the smart movement strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensingConfig {
    /// How far a herbivore looks for carnivores to flee from
    pub flee_radius: i32,
    /// How far a herbivore looks for plants
    pub plant_radius: i32,
    /// How far either kind looks for a mate
    pub mate_radius: i32,
    /// How far a carnivore looks for prey
    pub prey_radius: i32,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            flee_radius: 3,
            plant_radius: 4,
            mate_radius: 5,
            prey_radius: 6,
        }
    }
}

/// Tunables for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,

    /// Baseline number of plants seeded at construction
    pub initial_plants: usize,
    /// Baseline number of herbivores seeded at construction
    pub initial_herbivores: usize,
    /// Baseline number of carnivores seeded at construction
    pub initial_carnivores: usize,
    /// Lower bound of the multiplier applied to each baseline
    pub seed_multiplier_min: f32,
    /// Upper bound of the multiplier applied to each baseline
    pub seed_multiplier_max: f32,

    /// Plants spread every this many turns (0 disables spreading)
    pub plant_spread_period: u64,
    /// Chance (0-100) that one spread attempt succeeds
    pub plant_spread_chance_percent: u32,

    /// Plant population ceiling, percent of all cells
    pub max_plant_percent: u32,
    /// Herbivore population ceiling, percent of all cells
    pub max_herbivore_percent: u32,
    /// Carnivore population ceiling, percent of all cells
    pub max_carnivore_percent: u32,

    /// Turns an animal waits after mating before it may mate again
    pub repro_cooldown: u32,
    /// Turns of satiety granted by a meal
    pub satiety_after_eat: u32,
    /// Hunger at which an animal dies
    pub starvation_limit: u32,
    /// Turns a newborn stays immobile
    pub juvenile_duration: u32,

    pub movement_style: MovementStyle,
    pub sensing: SensingConfig,

    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            initial_plants: 250,
            initial_herbivores: 40,
            initial_carnivores: 25,
            seed_multiplier_min: 0.5,
            seed_multiplier_max: 2.0,
            plant_spread_period: 3,
            plant_spread_chance_percent: 50,
            max_plant_percent: 60,
            max_herbivore_percent: 20,
            max_carnivore_percent: 10,
            repro_cooldown: 4,
            satiety_after_eat: 3,
            starvation_limit: 8,
            juvenile_duration: 3,
            movement_style: MovementStyle::Smart,
            sensing: SensingConfig::default(),
            seed: 1337,
        }
    }
}

impl EcosystemConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn total_cells(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Population ceiling for a percent-of-cells cap
    pub fn ceiling(&self, percent: u32) -> usize {
        self.total_cells() * percent as usize / 100
    }

    pub fn max_plants(&self) -> usize {
        self.ceiling(self.max_plant_percent)
    }

    pub fn max_herbivores(&self) -> usize {
        self.ceiling(self.max_herbivore_percent)
    }

    pub fn max_carnivores(&self) -> usize {
        self.ceiling(self.max_carnivore_percent)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::Validation(format!(
                "grid of {}x{} cells is too large",
                self.width, self.height
            )));
        }

        let percents = [
            ("max_plant_percent", self.max_plant_percent),
            ("max_herbivore_percent", self.max_herbivore_percent),
            ("max_carnivore_percent", self.max_carnivore_percent),
            ("plant_spread_chance_percent", self.plant_spread_chance_percent),
        ];
        for (name, value) in percents {
            if value > 100 {
                return Err(Error::Validation(format!("{name} must be at most 100, got {value}")));
            }
        }

        if !(self.seed_multiplier_min >= 0.0 && self.seed_multiplier_min <= self.seed_multiplier_max) {
            return Err(Error::Validation(format!(
                "seed multiplier band [{}, {}] is invalid",
                self.seed_multiplier_min, self.seed_multiplier_max
            )));
        }

        let radii = [
            self.sensing.flee_radius,
            self.sensing.plant_radius,
            self.sensing.mate_radius,
            self.sensing.prey_radius,
        ];
        if radii.iter().any(|r| *r < 0) {
            return Err(Error::Validation("sensing radii must not be negative".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EcosystemConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 20);
        assert_eq!(config.starvation_limit, 8);
        assert_eq!(config.sensing.prey_radius, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ceilings() {
        let config = EcosystemConfig {
            width: 10,
            height: 10,
            max_plant_percent: 25,
            max_herbivore_percent: 0,
            max_carnivore_percent: 7,
            ..Default::default()
        };
        assert_eq!(config.total_cells(), 100);
        assert_eq!(config.max_plants(), 25);
        assert_eq!(config.max_herbivores(), 0);
        assert_eq!(config.max_carnivores(), 7);

        let small = EcosystemConfig {
            width: 3,
            height: 3,
            ..Default::default()
        };
        // 9 * 60 / 100 rounds down
        assert_eq!(small.ceiling(60), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EcosystemConfig::from_json_str(
            r#"{ "width": 12, "seed": 9, "sensing": { "prey_radius": 2 } }"#,
        )
        .unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 20);
        assert_eq!(config.seed, 9);
        assert_eq!(config.sensing.prey_radius, 2);
        assert_eq!(config.sensing.flee_radius, 3);
        assert_eq!(config.movement_style, MovementStyle::Smart);
    }

    #[test]
    fn test_movement_style_serialization() {
        let config = EcosystemConfig::from_json_str(r#"{ "movement_style": "random" }"#).unwrap();
        assert_eq!(config.movement_style, MovementStyle::Random);

        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"random\""));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero_width = EcosystemConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(zero_width.validate(), Err(Error::Validation(_))));

        let huge = EcosystemConfig {
            width: 50_000,
            height: 50_000,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(Error::Validation(_))));

        let big_percent = EcosystemConfig {
            max_plant_percent: 150,
            ..Default::default()
        };
        assert!(big_percent.validate().is_err());

        let inverted_band = EcosystemConfig {
            seed_multiplier_min: 3.0,
            seed_multiplier_max: 1.0,
            ..Default::default()
        };
        assert!(inverted_band.validate().is_err());

        assert!(EcosystemConfig::from_json_str("{ not json").is_err());
    }
}
