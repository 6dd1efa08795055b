//! Bounded 2D grid of cells.

use crate::organism::{Animal, Plant};
use eco_core::{AnimalKind, Direction, Position};

/// One grid position; owns at most one plant and at most one animal.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub plant: Option<Plant>,
    pub animal: Option<Animal>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.plant.is_none() && self.animal.is_none()
    }

    pub fn has_animal_of(&self, kind: AnimalKind) -> bool {
        self.animal.as_ref().is_some_and(|a| a.kind() == kind)
    }
}

/// A fixed-size, non-wrapping grid stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Cell at position, or None outside the grid
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.pos_to_index(pos))
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.pos_to_index(pos);
        self.cells.get_mut(index)
    }

    pub fn animal_at(&self, pos: Position) -> Option<&Animal> {
        self.get(pos).and_then(|cell| cell.animal.as_ref())
    }

    pub fn animal_at_mut(&mut self, pos: Position) -> Option<&mut Animal> {
        self.get_mut(pos).and_then(|cell| cell.animal.as_mut())
    }

    pub fn plant_at(&self, pos: Position) -> Option<&Plant> {
        self.get(pos).and_then(|cell| cell.plant.as_ref())
    }

    pub fn has_animal(&self, pos: Position) -> bool {
        self.animal_at(pos).is_some()
    }

    /// Put an animal into an empty animal slot. Hands the animal back if
    /// the position is outside the grid or already occupied.
    pub fn place_animal(&mut self, pos: Position, animal: Animal) -> std::result::Result<(), Animal> {
        match self.get_mut(pos) {
            Some(cell) if cell.animal.is_none() => {
                cell.animal = Some(animal);
                Ok(())
            }
            _ => Err(animal),
        }
    }

    /// Put a plant into an empty plant slot. Returns false if that was not possible.
    pub fn place_plant(&mut self, pos: Position, plant: Plant) -> bool {
        match self.get_mut(pos) {
            Some(cell) if cell.plant.is_none() => {
                cell.plant = Some(plant);
                true
            }
            _ => false,
        }
    }

    pub fn take_animal(&mut self, pos: Position) -> Option<Animal> {
        self.get_mut(pos).and_then(|cell| cell.animal.take())
    }

    pub fn take_plant(&mut self, pos: Position) -> Option<Plant> {
        self.get_mut(pos).and_then(|cell| cell.plant.take())
    }

    /// Transfer the animal at `from` into the empty animal slot at `to`.
    pub fn move_animal(&mut self, from: Position, to: Position) -> bool {
        if from == to || !self.has_animal(from) || !self.in_bounds(to) || self.has_animal(to) {
            return false;
        }

        match self.take_animal(from) {
            Some(animal) => self.place_animal(to, animal).is_ok(),
            None => false,
        }
    }

    /// In-bounds orthogonal neighbors in `Direction::all()` order
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::all()
            .into_iter()
            .map(move |dir| pos.step(dir))
            .filter(move |p| self.in_bounds(*p))
    }

    /// In-bounds cells of the square of `radius` around `pos`, row-major,
    /// including `pos` itself.
    pub fn square(&self, pos: Position, radius: i32) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        (-radius..=radius).flat_map(move |dy| {
            (-radius..=radius).filter_map(move |dx| {
                let p = pos.add(dx, dy);
                self.get(p).map(|cell| (p, cell))
            })
        })
    }

    /// Nearest cell by Manhattan distance within `radius` matching `predicate`.
    /// Ties go to the first cell in row-major order.
    pub fn find_nearest<F>(&self, pos: Position, radius: i32, predicate: F) -> Option<Position>
    where
        F: Fn(&Cell) -> bool,
    {
        let mut best: Option<(Position, i32)> = None;

        for (p, cell) in self.square(pos, radius) {
            if !predicate(cell) {
                continue;
            }
            let distance = pos.manhattan_distance(&p);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((p, distance));
            }
        }

        best.map(|(p, _)| p)
    }

    /// Caller guarantees `pos` is in bounds.
    fn pos_to_index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width.max(1) as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }

    pub fn count_plants(&self) -> usize {
        self.cells.iter().filter(|c| c.plant.is_some()).count()
    }

    pub fn count_animals(&self, kind: AnimalKind) -> usize {
        self.cells.iter().filter(|c| c.has_animal_of(kind)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{CarnivoreFeeding, HerbivoreFeeding, RandomWalk};
    use eco_core::Gender;
    use std::sync::Arc;

    fn animal(kind: AnimalKind) -> Animal {
        match kind {
            AnimalKind::Herbivore => Animal::new(
                kind,
                Gender::Male,
                Arc::new(RandomWalk),
                Arc::new(HerbivoreFeeding),
            ),
            AnimalKind::Carnivore => Animal::new(
                kind,
                Gender::Male,
                Arc::new(RandomWalk),
                Arc::new(CarnivoreFeeding),
            ),
        }
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 5);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 5);
        assert_eq!(grid.len(), 50);
        assert!(grid.iter().all(|(_, c)| c.is_empty()));
    }

    #[test]
    fn test_out_of_bounds_is_absent() {
        let mut grid = Grid::new(4, 3);
        assert!(grid.get(Position::new(-1, 0)).is_none());
        assert!(grid.get(Position::new(4, 0)).is_none());
        assert!(grid.get(Position::new(0, 3)).is_none());
        assert!(grid.get_mut(Position::new(0, -1)).is_none());
        assert!(grid.get(Position::new(3, 2)).is_some());
        assert!(!grid.place_plant(Position::new(9, 9), Plant::new()));
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index_to_pos(0), Position::new(0, 0));
        assert_eq!(grid.index_to_pos(5), Position::new(1, 1));
        assert_eq!(grid.index_to_pos(11), Position::new(3, 2));

        let order: Vec<Position> = grid.iter().map(|(p, _)| p).take(5).collect();
        assert_eq!(order[4], Position::new(0, 1));
    }

    #[test]
    fn test_single_occupant_per_slot() {
        let mut grid = Grid::new(3, 3);
        let pos = Position::new(1, 1);

        assert!(grid.place_animal(pos, animal(AnimalKind::Herbivore)).is_ok());
        let rejected = grid.place_animal(pos, animal(AnimalKind::Carnivore));
        assert!(rejected.is_err());
        assert_eq!(grid.animal_at(pos).unwrap().kind(), AnimalKind::Herbivore);

        assert!(grid.place_plant(pos, Plant::new()));
        assert!(!grid.place_plant(pos, Plant::new()));
        assert_eq!(grid.count_plants(), 1);
    }

    #[test]
    fn test_move_animal_transfers_ownership() {
        let mut grid = Grid::new(3, 1);
        let from = Position::new(0, 0);
        let to = Position::new(1, 0);
        grid.place_animal(from, animal(AnimalKind::Herbivore)).unwrap();
        grid.place_animal(Position::new(2, 0), animal(AnimalKind::Carnivore)).unwrap();

        assert!(grid.move_animal(from, to));
        assert!(!grid.has_animal(from));
        assert!(grid.has_animal(to));

        // occupied destination and out of bounds are refused
        assert!(!grid.move_animal(to, Position::new(2, 0)));
        assert!(!grid.move_animal(to, Position::new(1, 1)));
        assert!(!grid.move_animal(from, to));
        assert_eq!(grid.count_animals(AnimalKind::Herbivore), 1);
        assert_eq!(grid.count_animals(AnimalKind::Carnivore), 1);
    }

    #[test]
    fn test_neighbors_order_and_bounds() {
        let grid = Grid::new(3, 3);
        let center: Vec<Position> = grid.neighbors(Position::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Position::new(2, 1),
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(1, 0),
            ]
        );

        let corner: Vec<Position> = grid.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_square_clips_to_grid() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.square(Position::new(2, 2), 1).count(), 9);
        assert_eq!(grid.square(Position::new(0, 0), 1).count(), 4);
        assert_eq!(grid.square(Position::new(0, 0), 0).count(), 1);
    }

    #[test]
    fn test_find_nearest_ties_resolve_row_major() {
        let mut grid = Grid::new(5, 5);
        // Both at distance 1; (2, 1) comes first in row-major order.
        grid.place_plant(Position::new(2, 3), Plant::new());
        grid.place_plant(Position::new(2, 1), Plant::new());
        grid.place_plant(Position::new(4, 4), Plant::new());

        let nearest = grid.find_nearest(Position::new(2, 2), 2, |c| c.plant.is_some());
        assert_eq!(nearest, Some(Position::new(2, 1)));

        let none = grid.find_nearest(Position::new(0, 0), 1, |c| c.plant.is_some());
        assert_eq!(none, None);
    }
}
