//! World simulation engine.
//!
//! This module implements the 2D grid where plants grow and herbivores and
//! carnivores move, eat, breed and starve, one five-phase tick at a time.

pub mod grid;
pub mod organism;
pub mod strategy;
pub mod factory;
pub mod simulation;
pub mod inspect;
pub mod session;

pub use grid::{Cell, Grid};
pub use organism::{Animal, Plant};
pub use strategy::{FeedOutcome, FeedingStrategy, MovementStrategy};
pub use factory::EntityFactory;
pub use simulation::World;
pub use inspect::{AnimalDetail, CellDetail, CellGlyph};
pub use session::{Frame, Session};
