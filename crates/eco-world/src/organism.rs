//! Plant and animal state.

use crate::strategy::{FeedingStrategy, MovementStrategy};
use eco_core::{AnimalKind, Gender};
use std::sync::Arc;

/// A plant occupying a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plant {
    pub age: u64,
}

impl Plant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age_one_turn(&mut self) {
        self.age += 1;
    }
}

/// An animal occupying a cell
#[derive(Debug, Clone)]
pub struct Animal {
    kind: AnimalKind,
    gender: Gender,
    /// Turns since the last meal
    pub hunger: u32,
    /// Turns of fed grace left
    pub satiety: u32,
    /// Turns until the animal may mate again
    pub repro_cooldown: u32,
    /// Turns the animal stays immobile after birth
    pub juvenile_turns: u32,
    pub age: u64,
    pub birth_turn: u64,
    movement: Arc<dyn MovementStrategy>,
    feeding: Arc<dyn FeedingStrategy>,
}

impl Animal {
    pub fn new(
        kind: AnimalKind,
        gender: Gender,
        movement: Arc<dyn MovementStrategy>,
        feeding: Arc<dyn FeedingStrategy>,
    ) -> Self {
        Self {
            kind,
            gender,
            hunger: 0,
            satiety: 0,
            repro_cooldown: 0,
            juvenile_turns: 0,
            age: 0,
            birth_turn: 0,
            movement,
            feeding,
        }
    }

    pub fn kind(&self) -> AnimalKind {
        self.kind
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn movement(&self) -> &Arc<dyn MovementStrategy> {
        &self.movement
    }

    pub fn feeding(&self) -> &Arc<dyn FeedingStrategy> {
        &self.feeding
    }

    pub fn is_juvenile(&self) -> bool {
        self.juvenile_turns > 0
    }

    pub fn can_mate(&self) -> bool {
        self.repro_cooldown == 0
    }

    /// Whether `other` is an eligible partner for this animal
    pub fn is_compatible_mate(&self, other: &Animal) -> bool {
        other.kind == self.kind && other.gender == self.gender.opposite() && other.can_mate()
    }

    pub fn eat(&mut self, satiety_after_eat: u32) {
        self.satiety = satiety_after_eat;
        self.hunger = 0;
    }

    /// Count down the juvenile phase. Returns true if the animal is still a juvenile.
    pub fn grow(&mut self) -> bool {
        self.juvenile_turns = self.juvenile_turns.saturating_sub(1);
        self.is_juvenile()
    }

    /// End-of-turn bookkeeping: satiety is spent before hunger grows.
    pub fn age_one_turn(&mut self) {
        if self.satiety > 0 {
            self.satiety -= 1;
        } else {
            self.hunger += 1;
        }

        if self.repro_cooldown > 0 {
            self.repro_cooldown -= 1;
        }

        self.age += 1;
    }

    pub fn is_starving(&self, starvation_limit: u32) -> bool {
        self.hunger >= starvation_limit
    }
}
