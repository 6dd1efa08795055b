//! Turn-by-turn driver that hands inspection frames to a consumer.

use crate::inspect::CellDetail;
use crate::simulation::World;
use eco_core::{PopulationSummary, Position};
use serde::Serialize;
use tracing::{info, instrument};

/// What a renderer or logger receives before each tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub summary: PopulationSummary,
    pub grid: String,
    /// Dump of the debug cell, when one was requested and is on the grid
    pub detail: Option<CellDetail>,
}

/// A bounded run of a world
pub struct Session {
    world: World,
    turns: u64,
    debug_cell: Option<Position>,
}

impl Session {
    pub fn new(world: World, turns: u64, debug_cell: Option<Position>) -> Self {
        Self {
            world,
            turns,
            debug_cell,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    fn frame(&self) -> Frame {
        Frame {
            summary: self.world.summary(),
            grid: self.world.render_grid(self.debug_cell),
            detail: self.debug_cell.and_then(|pos| self.world.cell_detail(pos)),
        }
    }

    /// Emit a frame and step, `turns` times. Returns the census after the last step.
    #[instrument(skip(self, on_frame), fields(turns = self.turns))]
    pub fn run<F>(&mut self, mut on_frame: F) -> PopulationSummary
    where
        F: FnMut(&Frame),
    {
        info!("Starting session for {} turns", self.turns);

        for _ in 0..self.turns {
            let frame = self.frame();
            on_frame(&frame);
            self.world.step();
        }

        let summary = self.world.summary();
        let stats = self.world.lifetime_stats();
        info!(
            event = "session_summary",
            final_turn = summary.turn,
            plants = summary.plants,
            herbivores = summary.herbivores.total(),
            carnivores = summary.carnivores.total(),
            births = stats.births(),
            predations = stats.predations,
            starvations = stats.starvations,
            plants_eaten = stats.plants_eaten,
            "Session complete"
        );

        summary
    }
}
