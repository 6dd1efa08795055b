//! The world and its five-phase tick pipeline.

use crate::factory::EntityFactory;
use crate::grid::{Cell, Grid};
use crate::strategy::FeedOutcome;
use eco_core::{
    AnimalKind, Direction, EcosystemConfig, Error, Gender, LifetimeStats, Position, Result,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, event, info, instrument, trace, Level};

/// Turns between periodic population metric events
const METRICS_INTERVAL: u64 = 100;

pub struct World {
    grid: Grid,
    config: EcosystemConfig,
    factory: EntityFactory,
    rng: ChaCha8Rng,
    turn: u64,
    stats: LifetimeStats,
}

impl World {
    /// Build a world and seed its initial populations.
    pub fn new(config: EcosystemConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;
        world.seed_populations();
        Ok(world)
    }

    /// Build a world with an empty grid. Useful for hand-placed scenarios.
    pub fn empty(config: EcosystemConfig) -> Result<Self> {
        config.validate()?;

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::new(config.width, config.height);
        let factory = EntityFactory::new(&config);

        Ok(Self {
            grid,
            config,
            factory,
            rng,
            turn: 0,
            stats: LifetimeStats::new(),
        })
    }

    pub fn config(&self) -> &EcosystemConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn lifetime_stats(&self) -> &LifetimeStats {
        &self.stats
    }

    /// Place a new adult animal at `pos`.
    pub fn spawn_animal(&mut self, pos: Position, kind: AnimalKind, gender: Gender) -> Result<()> {
        let mut animal = self.factory.make_animal(kind, gender);
        animal.birth_turn = self.turn;
        self.grid.place_animal(pos, animal).map_err(|_| {
            Error::InvalidState(format!("cannot place {} at {}", kind, pos))
        })
    }

    /// Place a new plant at `pos`.
    pub fn spawn_plant(&mut self, pos: Position) -> Result<()> {
        if self.grid.place_plant(pos, self.factory.make_plant()) {
            Ok(())
        } else {
            Err(Error::InvalidState(format!("cannot place plant at {}", pos)))
        }
    }

    /// Advance the world by `turns` ticks.
    pub fn run(&mut self, turns: u64) {
        info!("Running world for {} turns", turns);
        for _ in 0..turns {
            self.step();
        }
    }

    /// Execute one tick: movement, feeding, reproduction, plant spread, aging.
    #[instrument(level = "trace", skip(self), fields(turn = self.turn))]
    pub fn step(&mut self) {
        self.move_animals();
        self.feed_animals();
        self.reproduce_animals();
        self.spread_plants();
        self.age_and_starve();

        self.turn += 1;

        if self.turn % METRICS_INTERVAL == 0 {
            self.emit_population_metrics();
        }
    }

    /// Phase 1: every adult picks a target, then all moves are applied in
    /// collection order. Juveniles count down instead of moving.
    pub fn move_animals(&mut self) {
        let mut planned: Vec<(Position, Position)> = Vec::new();
        let mut juveniles: Vec<Position> = Vec::new();

        let grid = &self.grid;
        for (pos, cell) in grid.iter() {
            let Some(animal) = cell.animal.as_ref() else {
                continue;
            };

            if animal.is_juvenile() {
                juveniles.push(pos);
                continue;
            }

            let target = animal.movement().choose_next(grid, pos, &mut self.rng);
            if target == pos || !grid.in_bounds(target) || grid.has_animal(target) {
                continue;
            }
            planned.push((pos, target));
        }

        for pos in juveniles {
            if let Some(animal) = self.grid.animal_at_mut(pos) {
                animal.grow();
            }
        }

        let mut applied = 0u64;
        let mut rejected = 0u64;
        for (from, to) in planned {
            if self.grid.move_animal(from, to) {
                applied += 1;
            } else {
                trace!(from = %from, to = %to, turn = self.turn, "Move rejected: destination taken");
                rejected += 1;
            }
        }

        self.stats.moves_applied += applied;
        self.stats.moves_rejected += rejected;
        debug!(turn = self.turn, applied, rejected, "Movement phase complete");
    }

    /// Phase 2: every animal tries its feeding strategy in scan order.
    pub fn feed_animals(&mut self) {
        let satiety = self.config.satiety_after_eat;
        let mut meals = 0u64;

        for index in 0..self.grid.len() {
            let pos = self.grid.index_to_pos(index);
            let Some(feeding) = self.grid.animal_at(pos).map(|a| a.feeding().clone()) else {
                continue;
            };

            match feeding.try_feed(&mut self.grid, pos, satiety) {
                FeedOutcome::Nothing => {}
                FeedOutcome::AtePlant => {
                    self.stats.plants_eaten += 1;
                    meals += 1;
                }
                FeedOutcome::AtePrey { prey } => {
                    trace!(hunter = %pos, prey = %prey, turn = self.turn, "Herbivore eaten");
                    self.stats.predations += 1;
                    meals += 1;
                }
            }
        }

        debug!(turn = self.turn, meals, "Feeding phase complete");
    }

    /// Phase 3: an animal ready to mate pairs with the first compatible
    /// neighbor and places a juvenile on its own first free neighbor.
    pub fn reproduce_animals(&mut self) {
        let cooldown = self.config.repro_cooldown;
        let juvenile_duration = self.config.juvenile_duration;
        let mut births = 0usize;

        for index in 0..self.grid.len() {
            let pos = self.grid.index_to_pos(index);
            let Some(parent) = self.grid.animal_at(pos) else {
                continue;
            };
            if !parent.can_mate() {
                continue;
            }
            let kind = parent.kind();

            let mate = self.grid.neighbors(pos).find(|n| {
                self.grid
                    .animal_at(*n)
                    .is_some_and(|other| parent.is_compatible_mate(other))
            });
            let Some(mate) = mate else {
                continue;
            };

            let Some(nursery) = self.grid.neighbors(pos).find(|n| !self.grid.has_animal(*n)) else {
                trace!(parent = %pos, turn = self.turn, "Reproduction failed: no free neighbor");
                continue;
            };

            let mut baby = self.factory.make_random_animal(kind, &mut self.rng);
            baby.juvenile_turns = juvenile_duration;
            baby.birth_turn = self.turn;
            let baby_gender = baby.gender();

            if self.grid.place_animal(nursery, baby).is_err() {
                continue;
            }
            for parent_pos in [pos, mate] {
                if let Some(animal) = self.grid.animal_at_mut(parent_pos) {
                    animal.repro_cooldown = cooldown;
                }
            }

            births += 1;
            self.stats.record_birth(kind);
            trace!(
                kind = %kind,
                gender = %baby_gender,
                parent = %pos,
                mate = %mate,
                nursery = %nursery,
                turn = self.turn,
                "Animal born"
            );
        }

        debug!(turn = self.turn, births, "Reproduction phase complete");
    }

    /// Phase 4: on spread turns, each existing plant may seed one random
    /// empty neighbor, never past the plant ceiling.
    pub fn spread_plants(&mut self) {
        let period = self.config.plant_spread_period;
        if period == 0 || self.turn == 0 || self.turn % period != 0 {
            return;
        }

        let ceiling = self.config.max_plants();
        let mut plants = self.grid.count_plants();
        if plants >= ceiling {
            return;
        }

        let sources: Vec<Position> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.plant.is_some())
            .map(|(pos, _)| pos)
            .collect();
        let chance = self.config.plant_spread_chance_percent;
        let mut spread = 0u64;

        for source in sources {
            if plants >= ceiling {
                break;
            }

            let target = source.step(Direction::random(&mut self.rng));
            if !self.grid.get(target).is_some_and(Cell::is_empty) {
                continue;
            }
            if self.rng.gen_range(0..100) >= chance {
                continue;
            }

            if self.grid.place_plant(target, self.factory.make_plant()) {
                plants += 1;
                spread += 1;
            }
        }

        self.stats.plants_spread += spread;
        debug!(turn = self.turn, spread, plants, ceiling, "Plant spread phase complete");
    }

    /// Phase 5: plants age; animals spend satiety or grow hungrier, cool
    /// down, and die once hunger reaches the starvation limit.
    pub fn age_and_starve(&mut self) {
        let limit = self.config.starvation_limit;
        let mut starved = 0u64;

        for index in 0..self.grid.len() {
            let pos = self.grid.index_to_pos(index);
            let Some(cell) = self.grid.get_mut(pos) else {
                continue;
            };

            if let Some(plant) = cell.plant.as_mut() {
                plant.age_one_turn();
            }

            let Some(animal) = cell.animal.as_mut() else {
                continue;
            };
            animal.age_one_turn();

            if animal.is_starving(limit) {
                trace!(kind = %animal.kind(), at = %pos, age = animal.age, turn = self.turn, "Animal starved");
                cell.animal = None;
                starved += 1;
            }
        }

        self.stats.starvations += starved;
        debug!(turn = self.turn, starved, "Aging phase complete");
    }

    fn seed_populations(&mut self) {
        let plants = self.sample_count(self.config.initial_plants, self.config.max_plants());
        let herbivores =
            self.sample_count(self.config.initial_herbivores, self.config.max_herbivores());
        let carnivores =
            self.sample_count(self.config.initial_carnivores, self.config.max_carnivores());

        let placed_plants = self.seed_plants(plants);
        let placed_herbivores = self.seed_animals(AnimalKind::Herbivore, herbivores);
        let placed_carnivores = self.seed_animals(AnimalKind::Carnivore, carnivores);

        info!(
            event = "world_seeded",
            width = self.config.width,
            height = self.config.height,
            seed = self.config.seed,
            plants_requested = plants,
            plants_placed = placed_plants,
            herbivores_requested = herbivores,
            herbivores_placed = placed_herbivores,
            carnivores_requested = carnivores,
            carnivores_placed = placed_carnivores,
            "World seeded"
        );
    }

    /// Baseline scaled by a random multiplier from the configured band,
    /// capped at `ceiling`.
    fn sample_count(&mut self, baseline: usize, ceiling: usize) -> usize {
        if baseline == 0 {
            return 0;
        }

        let min = self.config.seed_multiplier_min;
        let max = self.config.seed_multiplier_max;
        let multiplier = if min < max {
            self.rng.gen_range(min..=max)
        } else {
            min
        };

        ((baseline as f32 * multiplier).round() as usize).min(ceiling)
    }

    fn seed_plants(&mut self, count: usize) -> usize {
        let mut placed = 0;
        let mut guard = count * 20 + 1000;

        while placed < count && guard > 0 {
            guard -= 1;
            let pos = self.random_position();
            if self.grid.place_plant(pos, self.factory.make_plant()) {
                placed += 1;
            }
        }

        placed
    }

    fn seed_animals(&mut self, kind: AnimalKind, count: usize) -> usize {
        let mut placed = 0;
        let mut guard = count * 20 + 1000;

        while placed < count && guard > 0 {
            guard -= 1;
            let pos = self.random_position();
            if self.grid.has_animal(pos) {
                continue;
            }
            let animal = self.factory.make_random_animal(kind, &mut self.rng);
            if self.grid.place_animal(pos, animal).is_ok() {
                placed += 1;
            }
        }

        if placed < count {
            debug!(kind = %kind, requested = count, placed, "Grid too full to seed every animal");
        }
        placed
    }

    fn random_position(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.config.width);
        let y = self.rng.gen_range(0..self.config.height);
        Position::new(x, y)
    }

    fn emit_population_metrics(&self) {
        let summary = self.summary();

        info!(
            event = "population_metrics",
            turn = self.turn,
            plants = summary.plants,
            herbivores = summary.herbivores.total(),
            herbivore_juveniles = summary.herbivores.juveniles(),
            carnivores = summary.carnivores.total(),
            carnivore_juveniles = summary.carnivores.juveniles(),
            births_total = self.stats.births(),
            predations_total = self.stats.predations,
            starvations_total = self.stats.starvations,
            plants_spread_total = self.stats.plants_spread,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_total",
            gauge_value = summary.animals(),
            turn = self.turn,
            "Population gauge"
        );

        event!(
            Level::INFO,
            gauge_name = "plants_total",
            gauge_value = summary.plants,
            turn = self.turn,
            "Plant gauge"
        );
    }
}
