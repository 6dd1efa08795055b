//! Read-only views of the world for renderers and loggers.

use crate::grid::Cell;
use crate::simulation::World;
use eco_core::{AnimalKind, Gender, PopulationSummary, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character classification of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellGlyph {
    Empty,
    Plant,
    Animal {
        kind: AnimalKind,
        gender: Gender,
        juvenile: bool,
    },
}

impl CellGlyph {
    /// Marker drawn over the debug cell
    pub const MARKER: char = 'X';

    pub fn classify(cell: &Cell) -> Self {
        match (&cell.animal, &cell.plant) {
            (Some(animal), _) => CellGlyph::Animal {
                kind: animal.kind(),
                gender: animal.gender(),
                juvenile: animal.is_juvenile(),
            },
            (None, Some(_)) => CellGlyph::Plant,
            (None, None) => CellGlyph::Empty,
        }
    }

    pub fn to_char(&self) -> char {
        match *self {
            CellGlyph::Empty => '.',
            CellGlyph::Plant => '*',
            CellGlyph::Animal { kind, gender, juvenile } => match (kind, juvenile, gender) {
                (AnimalKind::Herbivore, false, Gender::Male) => 'H',
                (AnimalKind::Herbivore, false, Gender::Female) => 'h',
                (AnimalKind::Herbivore, true, Gender::Male) => 'J',
                (AnimalKind::Herbivore, true, Gender::Female) => 'j',
                (AnimalKind::Carnivore, false, Gender::Male) => 'C',
                (AnimalKind::Carnivore, false, Gender::Female) => 'c',
                (AnimalKind::Carnivore, true, Gender::Male) => 'K',
                (AnimalKind::Carnivore, true, Gender::Female) => 'k',
            },
        }
    }

    /// Legend lines describing every glyph
    pub fn legend() -> &'static [(char, &'static str)] {
        &[
            ('.', "empty"),
            ('*', "plant"),
            ('H', "herbivore, adult male"),
            ('h', "herbivore, adult female"),
            ('J', "herbivore, juvenile male"),
            ('j', "herbivore, juvenile female"),
            ('C', "carnivore, adult male"),
            ('c', "carnivore, adult female"),
            ('K', "carnivore, juvenile male"),
            ('k', "carnivore, juvenile female"),
            (CellGlyph::MARKER, "debug cell"),
        ]
    }
}

/// Animal fields shown in a cell dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalDetail {
    pub kind: AnimalKind,
    pub gender: Gender,
    pub juvenile: bool,
    pub hunger: u32,
    pub satiety: u32,
    pub repro_cooldown: u32,
    pub juvenile_turns: u32,
    pub age: u64,
    pub birth_turn: u64,
}

/// Everything known about one cell, for debugging a chosen coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDetail {
    pub position: Position,
    /// Age of the plant on the cell, if any
    pub plant_age: Option<u64>,
    pub animal: Option<AnimalDetail>,
}

impl fmt::Display for CellDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell {}", self.position)?;
        match self.plant_age {
            Some(age) => write!(f, " | plant (age {})", age)?,
            None => write!(f, " | no plant")?,
        }

        match &self.animal {
            None => write!(f, " | no animal"),
            Some(a) => write!(
                f,
                " | {} {} juvenile={} hunger={} satiety={} cooldown={} juvenile_turns={} age={} born={}",
                a.kind,
                a.gender,
                a.juvenile,
                a.hunger,
                a.satiety,
                a.repro_cooldown,
                a.juvenile_turns,
                a.age,
                a.birth_turn,
            ),
        }
    }
}

impl World {
    /// Population census for the current turn
    pub fn summary(&self) -> PopulationSummary {
        let mut summary = PopulationSummary {
            turn: self.turn(),
            ..Default::default()
        };

        for (_, cell) in self.grid().iter() {
            if cell.plant.is_some() {
                summary.plants += 1;
            }
            if let Some(animal) = cell.animal.as_ref() {
                summary
                    .census_mut(animal.kind())
                    .record(animal.gender(), animal.is_juvenile());
            }
        }

        summary
    }

    pub fn glyph_at(&self, pos: Position) -> Option<CellGlyph> {
        self.grid().get(pos).map(CellGlyph::classify)
    }

    /// Text rendering, one line per row. `marker` overrides one cell with `X`.
    pub fn render_grid(&self, marker: Option<Position>) -> String {
        let grid = self.grid();
        let mut out = String::with_capacity(grid.len() + grid.height.max(0) as usize);

        for (pos, cell) in grid.iter() {
            if marker == Some(pos) {
                out.push(CellGlyph::MARKER);
            } else {
                out.push(CellGlyph::classify(cell).to_char());
            }
            if pos.x == grid.width - 1 {
                out.push('\n');
            }
        }

        out
    }

    /// Detailed dump of one cell, or None outside the grid
    pub fn cell_detail(&self, pos: Position) -> Option<CellDetail> {
        let cell = self.grid().get(pos)?;

        Some(CellDetail {
            position: pos,
            plant_age: cell.plant.as_ref().map(|p| p.age),
            animal: cell.animal.as_ref().map(|a| AnimalDetail {
                kind: a.kind(),
                gender: a.gender(),
                juvenile: a.is_juvenile(),
                hunger: a.hunger,
                satiety: a.satiety,
                repro_cooldown: a.repro_cooldown,
                juvenile_turns: a.juvenile_turns,
                age: a.age,
                birth_turn: a.birth_turn,
            }),
        })
    }
}
