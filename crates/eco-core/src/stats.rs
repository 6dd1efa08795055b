//! Population census and run statistics.

use crate::types::{AnimalKind, Gender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Head count for one animal kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCensus {
    pub males: usize,
    pub females: usize,
    pub juvenile_males: usize,
    pub juvenile_females: usize,
}

impl KindCensus {
    pub fn record(&mut self, gender: Gender, juvenile: bool) {
        match (gender, juvenile) {
            (Gender::Male, false) => self.males += 1,
            (Gender::Female, false) => self.females += 1,
            (Gender::Male, true) => self.juvenile_males += 1,
            (Gender::Female, true) => self.juvenile_females += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.adults() + self.juveniles()
    }

    pub fn adults(&self) -> usize {
        self.males + self.females
    }

    pub fn juveniles(&self) -> usize {
        self.juvenile_males + self.juvenile_females
    }
}

/// Snapshot of the world's populations at the start of a turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub turn: u64,
    pub plants: usize,
    pub herbivores: KindCensus,
    pub carnivores: KindCensus,
}

impl PopulationSummary {
    pub fn census_mut(&mut self, kind: AnimalKind) -> &mut KindCensus {
        match kind {
            AnimalKind::Herbivore => &mut self.herbivores,
            AnimalKind::Carnivore => &mut self.carnivores,
        }
    }

    pub fn animals(&self) -> usize {
        self.herbivores.total() + self.carnivores.total()
    }
}

impl fmt::Display for PopulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn {} | Plants={} | Herb={} (juv M/F {}/{}) | Carn={} (juv M/F {}/{})",
            self.turn,
            self.plants,
            self.herbivores.total(),
            self.herbivores.juvenile_males,
            self.herbivores.juvenile_females,
            self.carnivores.total(),
            self.carnivores.juvenile_males,
            self.carnivores.juvenile_females,
        )
    }
}

/// Counters accumulated over the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub herbivore_births: u64,
    pub carnivore_births: u64,
    pub predations: u64,
    pub plants_eaten: u64,
    pub plants_spread: u64,
    pub starvations: u64,
    pub moves_applied: u64,
    pub moves_rejected: u64,
}

impl LifetimeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_birth(&mut self, kind: AnimalKind) {
        match kind {
            AnimalKind::Herbivore => self.herbivore_births += 1,
            AnimalKind::Carnivore => self.carnivore_births += 1,
        }
    }

    pub fn births(&self) -> u64 {
        self.herbivore_births + self.carnivore_births
    }

    /// Deaths from both causes
    pub fn deaths(&self) -> u64 {
        self.predations + self.starvations
    }
}
