//! Builds plants and animals with the strategy pair for their kind.

use crate::organism::{Animal, Plant};
use crate::strategy::{
    CarnivoreFeeding, FeedingStrategy, HerbivoreFeeding, MovementStrategy, RandomWalk,
    SmartCarnivoreMove, SmartHerbivoreMove,
};
use eco_core::{AnimalKind, EcosystemConfig, Gender, MovementStyle};
use rand::Rng;
use std::sync::Arc;

/// Holds one shared strategy instance per kind so every animal of a kind
/// points at the same behavior.
#[derive(Debug, Clone)]
pub struct EntityFactory {
    herbivore_movement: Arc<dyn MovementStrategy>,
    carnivore_movement: Arc<dyn MovementStrategy>,
    herbivore_feeding: Arc<dyn FeedingStrategy>,
    carnivore_feeding: Arc<dyn FeedingStrategy>,
}

impl EntityFactory {
    pub fn new(config: &EcosystemConfig) -> Self {
        let (herbivore_movement, carnivore_movement): (
            Arc<dyn MovementStrategy>,
            Arc<dyn MovementStrategy>,
        ) = match config.movement_style {
            MovementStyle::Smart => (
                Arc::new(SmartHerbivoreMove::new(&config.sensing)),
                Arc::new(SmartCarnivoreMove::new(&config.sensing)),
            ),
            MovementStyle::Random => (Arc::new(RandomWalk), Arc::new(RandomWalk)),
        };

        Self {
            herbivore_movement,
            carnivore_movement,
            herbivore_feeding: Arc::new(HerbivoreFeeding),
            carnivore_feeding: Arc::new(CarnivoreFeeding),
        }
    }

    pub fn make_plant(&self) -> Plant {
        Plant::new()
    }

    pub fn make_animal(&self, kind: AnimalKind, gender: Gender) -> Animal {
        let (movement, feeding) = match kind {
            AnimalKind::Herbivore => (&self.herbivore_movement, &self.herbivore_feeding),
            AnimalKind::Carnivore => (&self.carnivore_movement, &self.carnivore_feeding),
        };
        Animal::new(kind, gender, movement.clone(), feeding.clone())
    }

    pub fn make_random_animal<R: Rng + ?Sized>(&self, kind: AnimalKind, rng: &mut R) -> Animal {
        self.make_animal(kind, Gender::random(rng))
    }

    pub fn make_herbivore(&self, gender: Gender) -> Animal {
        self.make_animal(AnimalKind::Herbivore, gender)
    }

    pub fn make_carnivore(&self, gender: Gender) -> Animal {
        self.make_animal(AnimalKind::Carnivore, gender)
    }
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::new(&EcosystemConfig::default())
    }
}
