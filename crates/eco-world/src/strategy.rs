//! Movement and feeding behaviors bound to animals at construction.
//!
//! Movement strategies only read the grid and return a candidate target;
//! the world decides whether the move is applied. Feeding strategies mutate
//! the grid directly.

use crate::grid::Grid;
use eco_core::{AnimalKind, Direction, Position, SensingConfig};
use rand::RngCore;
use std::fmt;

/// Chooses where an animal wants to go this turn.
pub trait MovementStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Candidate target for the animal at `pos`. Returning `pos` means "stay".
    fn choose_next(&self, grid: &Grid, pos: Position, rng: &mut dyn RngCore) -> Position;
}

/// Result of one feeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    Nothing,
    AtePlant,
    AtePrey { prey: Position },
}

/// Lets an animal eat from its surroundings.
pub trait FeedingStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn try_feed(&self, grid: &mut Grid, pos: Position, satiety_after_eat: u32) -> FeedOutcome;
}

/// Uniform step in one of the four orthogonal directions
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalk;

impl MovementStrategy for RandomWalk {
    fn name(&self) -> &'static str {
        "random_walk"
    }

    fn choose_next(&self, _grid: &Grid, pos: Position, rng: &mut dyn RngCore) -> Position {
        pos.step(Direction::random(rng))
    }
}

/// Nearest same-kind, opposite-gender partner that is ready to mate, if the
/// animal at `pos` is ready itself.
fn nearest_mate(grid: &Grid, pos: Position, radius: i32) -> Option<Position> {
    let me = grid.animal_at(pos)?;
    if !me.can_mate() {
        return None;
    }

    grid.find_nearest(pos, radius, |cell| {
        cell.animal
            .as_ref()
            .is_some_and(|other| me.is_compatible_mate(other))
    })
}

/// Flee predators, then seek plants, then seek a mate, else wander
#[derive(Debug, Clone)]
pub struct SmartHerbivoreMove {
    pub flee_radius: i32,
    pub plant_radius: i32,
    pub mate_radius: i32,
}

impl SmartHerbivoreMove {
    pub fn new(sensing: &SensingConfig) -> Self {
        Self {
            flee_radius: sensing.flee_radius,
            plant_radius: sensing.plant_radius,
            mate_radius: sensing.mate_radius,
        }
    }

    /// Free neighbor that strictly increases the distance to the nearest carnivore.
    fn flee(&self, grid: &Grid, pos: Position) -> Option<Position> {
        let predator = grid.find_nearest(pos, self.flee_radius, |cell| {
            cell.has_animal_of(AnimalKind::Carnivore)
        })?;

        let mut best = None;
        let mut best_distance = pos.manhattan_distance(&predator);

        for candidate in grid.neighbors(pos) {
            if grid.has_animal(candidate) {
                continue;
            }
            let distance = candidate.manhattan_distance(&predator);
            if distance > best_distance {
                best_distance = distance;
                best = Some(candidate);
            }
        }

        best
    }
}

impl Default for SmartHerbivoreMove {
    fn default() -> Self {
        Self::new(&SensingConfig::default())
    }
}

impl MovementStrategy for SmartHerbivoreMove {
    fn name(&self) -> &'static str {
        "smart_herbivore"
    }

    fn choose_next(&self, grid: &Grid, pos: Position, rng: &mut dyn RngCore) -> Position {
        if let Some(escape) = self.flee(grid, pos) {
            return escape;
        }

        if let Some(plant) = grid.find_nearest(pos, self.plant_radius, |cell| cell.plant.is_some()) {
            return pos.step_towards(&plant);
        }

        if let Some(mate) = nearest_mate(grid, pos, self.mate_radius) {
            return pos.step_towards(&mate);
        }

        RandomWalk.choose_next(grid, pos, rng)
    }
}

/// Chase prey, then seek a mate, else wander
#[derive(Debug, Clone)]
pub struct SmartCarnivoreMove {
    pub prey_radius: i32,
    pub mate_radius: i32,
}

impl SmartCarnivoreMove {
    pub fn new(sensing: &SensingConfig) -> Self {
        Self {
            prey_radius: sensing.prey_radius,
            mate_radius: sensing.mate_radius,
        }
    }
}

impl Default for SmartCarnivoreMove {
    fn default() -> Self {
        Self::new(&SensingConfig::default())
    }
}

impl MovementStrategy for SmartCarnivoreMove {
    fn name(&self) -> &'static str {
        "smart_carnivore"
    }

    fn choose_next(&self, grid: &Grid, pos: Position, rng: &mut dyn RngCore) -> Position {
        let prey = grid.find_nearest(pos, self.prey_radius, |cell| {
            cell.has_animal_of(AnimalKind::Herbivore)
        });
        if let Some(prey) = prey {
            return pos.step_towards(&prey);
        }

        if let Some(mate) = nearest_mate(grid, pos, self.mate_radius) {
            return pos.step_towards(&mate);
        }

        RandomWalk.choose_next(grid, pos, rng)
    }
}

/// Eats a plant sharing the animal's cell
#[derive(Debug, Clone, Copy, Default)]
pub struct HerbivoreFeeding;

impl FeedingStrategy for HerbivoreFeeding {
    fn name(&self) -> &'static str {
        "herbivore_feeding"
    }

    fn try_feed(&self, grid: &mut Grid, pos: Position, satiety_after_eat: u32) -> FeedOutcome {
        if !grid.has_animal(pos) || grid.take_plant(pos).is_none() {
            return FeedOutcome::Nothing;
        }

        if let Some(animal) = grid.animal_at_mut(pos) {
            animal.eat(satiety_after_eat);
        }
        FeedOutcome::AtePlant
    }
}

/// Eats the first herbivore found among the orthogonal neighbors
#[derive(Debug, Clone, Copy, Default)]
pub struct CarnivoreFeeding;

impl FeedingStrategy for CarnivoreFeeding {
    fn name(&self) -> &'static str {
        "carnivore_feeding"
    }

    fn try_feed(&self, grid: &mut Grid, pos: Position, satiety_after_eat: u32) -> FeedOutcome {
        if !grid.has_animal(pos) {
            return FeedOutcome::Nothing;
        }

        let prey = grid
            .neighbors(pos)
            .find(|n| grid.get(*n).is_some_and(|c| c.has_animal_of(AnimalKind::Herbivore)));

        let Some(prey) = prey else {
            return FeedOutcome::Nothing;
        };

        grid.take_animal(prey);
        if let Some(hunter) = grid.animal_at_mut(pos) {
            hunter.eat(satiety_after_eat);
        }

        FeedOutcome::AtePrey { prey }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::{Animal, Plant};
    use eco_core::Gender;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn herbivore(gender: Gender) -> Animal {
        Animal::new(
            AnimalKind::Herbivore,
            gender,
            Arc::new(SmartHerbivoreMove::default()),
            Arc::new(HerbivoreFeeding),
        )
    }

    fn carnivore(gender: Gender) -> Animal {
        Animal::new(
            AnimalKind::Carnivore,
            gender,
            Arc::new(SmartCarnivoreMove::default()),
            Arc::new(CarnivoreFeeding),
        )
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_random_walk_is_orthogonal() {
        let grid = Grid::new(5, 5);
        let mut rng = rng();
        let pos = Position::new(2, 2);

        for _ in 0..50 {
            let next = RandomWalk.choose_next(&grid, pos, &mut rng);
            assert_eq!(pos.manhattan_distance(&next), 1);
        }
    }

    #[test]
    fn test_herbivore_flees_carnivore() {
        let mut grid = Grid::new(5, 1);
        let me = Position::new(2, 0);
        grid.place_animal(me, herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(4, 0), carnivore(Gender::Male)).unwrap();
        // A plant in the other direction must not win over fleeing.
        grid.place_plant(Position::new(3, 0), Plant::new());

        let next = SmartHerbivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, Position::new(1, 0));
    }

    #[test]
    fn test_herbivore_falls_through_when_cornered() {
        let mut grid = Grid::new(3, 1);
        let me = Position::new(0, 0);
        grid.place_animal(me, herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(2, 0), carnivore(Gender::Male)).unwrap();
        grid.place_plant(Position::new(1, 0), Plant::new());

        // No neighbor increases the distance, so it seeks the plant instead.
        let next = SmartHerbivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, Position::new(1, 0));
    }

    #[test]
    fn test_herbivore_seeks_plant_x_first() {
        let mut grid = Grid::new(9, 9);
        let me = Position::new(4, 4);
        grid.place_animal(me, herbivore(Gender::Female)).unwrap();
        grid.place_plant(Position::new(6, 6), Plant::new());

        let next = SmartHerbivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, Position::new(5, 4));
    }

    #[test]
    fn test_herbivore_stays_on_own_plant() {
        let mut grid = Grid::new(5, 5);
        let me = Position::new(2, 2);
        grid.place_animal(me, herbivore(Gender::Female)).unwrap();
        grid.place_plant(me, Plant::new());
        grid.place_plant(Position::new(3, 2), Plant::new());

        let next = SmartHerbivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, me);
    }

    #[test]
    fn test_herbivore_seeks_mate_only_when_ready() {
        let mut grid = Grid::new(9, 9);
        let me = Position::new(1, 4);
        grid.place_animal(me, herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(1, 1), herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(4, 4), herbivore(Gender::Female)).unwrap();

        let strategy = SmartHerbivoreMove::default();
        assert_eq!(strategy.choose_next(&grid, me, &mut rng()), Position::new(2, 4));

        grid.animal_at_mut(me).unwrap().repro_cooldown = 2;
        let wander = strategy.choose_next(&grid, me, &mut rng());
        assert_eq!(me.manhattan_distance(&wander), 1);
    }

    #[test]
    fn test_carnivore_chases_nearest_prey() {
        let mut grid = Grid::new(13, 13);
        let me = Position::new(6, 6);
        grid.place_animal(me, carnivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(6, 1), herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(9, 6), herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(7, 6), carnivore(Gender::Female)).unwrap();

        let next = SmartCarnivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, Position::new(7, 6));
    }

    #[test]
    fn test_carnivore_seeks_mate_without_prey() {
        let mut grid = Grid::new(13, 13);
        let me = Position::new(6, 6);
        grid.place_animal(me, carnivore(Gender::Female)).unwrap();
        grid.place_animal(Position::new(6, 3), carnivore(Gender::Male)).unwrap();

        let next = SmartCarnivoreMove::default().choose_next(&grid, me, &mut rng());
        assert_eq!(next, Position::new(6, 5));
    }

    #[test]
    fn test_herbivore_feeding() {
        let mut grid = Grid::new(2, 1);
        let pos = Position::new(0, 0);
        grid.place_animal(pos, herbivore(Gender::Male)).unwrap();
        grid.animal_at_mut(pos).unwrap().hunger = 4;

        assert_eq!(HerbivoreFeeding.try_feed(&mut grid, pos, 3), FeedOutcome::Nothing);

        grid.place_plant(pos, Plant::new());
        assert_eq!(HerbivoreFeeding.try_feed(&mut grid, pos, 3), FeedOutcome::AtePlant);
        assert!(grid.plant_at(pos).is_none());
        let animal = grid.animal_at(pos).unwrap();
        assert_eq!((animal.hunger, animal.satiety), (0, 3));

        // No animal, no meal.
        grid.place_plant(Position::new(1, 0), Plant::new());
        assert_eq!(
            HerbivoreFeeding.try_feed(&mut grid, Position::new(1, 0), 3),
            FeedOutcome::Nothing
        );
        assert!(grid.plant_at(Position::new(1, 0)).is_some());
    }

    #[test]
    fn test_carnivore_feeding_takes_first_neighbor() {
        let mut grid = Grid::new(3, 3);
        let me = Position::new(1, 1);
        grid.place_animal(me, carnivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(0, 1), herbivore(Gender::Male)).unwrap();
        grid.place_animal(Position::new(1, 0), herbivore(Gender::Female)).unwrap();
        grid.place_animal(Position::new(2, 1), carnivore(Gender::Female)).unwrap();

        let outcome = CarnivoreFeeding.try_feed(&mut grid, me, 5);
        assert_eq!(outcome, FeedOutcome::AtePrey { prey: Position::new(0, 1) });
        assert!(!grid.has_animal(Position::new(0, 1)));
        assert!(grid.has_animal(Position::new(1, 0)));
        assert_eq!(grid.animal_at(me).unwrap().satiety, 5);
        assert_eq!(grid.count_animals(AnimalKind::Carnivore), 2);
    }
}
