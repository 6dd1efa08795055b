//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position one orthogonal step away
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// One greedy step toward `target`, closing the x gap before the y gap.
    pub fn step_towards(&self, target: &Position) -> Self {
        let dx = (target.x - self.x).signum();
        let dy = (target.y - self.y).signum();

        if dx != 0 {
            self.add(dx, 0)
        } else if dy != 0 {
            self.add(0, dy)
        } else {
            *self
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal direction for movement and neighborhood scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
        }
    }

    /// Every neighborhood scan visits directions in this order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::East,
            Direction::West,
            Direction::South,
            Direction::North,
        ]
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..4)]
    }
}

/// Species of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Herbivore,
    Carnivore,
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalKind::Herbivore => write!(f, "Herbivore"),
            AnimalKind::Carnivore => write!(f, "Carnivore"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn opposite(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(&pos2), 7);
        assert_eq!(pos2.manhattan_distance(&pos1), 7);
    }

    #[test]
    fn test_step_towards_prefers_x() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.step_towards(&Position::new(5, 0)), Position::new(3, 2));
        assert_eq!(pos.step_towards(&Position::new(0, 9)), Position::new(1, 2));
        assert_eq!(pos.step_towards(&Position::new(2, 0)), Position::new(2, 1));
        assert_eq!(pos.step_towards(&Position::new(2, 2)), pos);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Position::new(1, 1).step(Direction::North), Position::new(1, 0));
    }

    #[test]
    fn test_random_gender_covers_both() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let genders: Vec<Gender> = (0..64).map(|_| Gender::random(&mut rng)).collect();
        assert!(genders.contains(&Gender::Male));
        assert!(genders.contains(&Gender::Female));
        assert_eq!(Gender::Male.opposite(), Gender::Female);
    }
}
