//! Tick system - one scheduler pass over every dwarf
//!
//! Each tick:
//! 1. Dwarves already standing on a job claim it and work in place
//! 2. Everyone else searches one shared frontier for the nearest job,
//!    claims it and takes one step along the path
//! 3. All reservations are released
//!
//! Nothing is remembered between ticks. A dwarf re-finds its job every tick,
//! which lets a closer dwarf take over a job another one was walking to.

use crate::city::building::StructureKind;
use crate::core::types::{DwarfId, ItemId, Tick};
use crate::ecs::world::World;
use crate::simulation::search::search_and_claim;
use crate::simulation::work::{
    advance, claimed_job, return_work, try_claim, AdvanceOutcome, JobKind,
};
use crate::spatial::grid::{waypoint, Cell};

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` for display in a UI log.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A dwarf reserved a job for this tick
    JobClaimed {
        dwarf: DwarfId,
        cell: Cell,
        job: JobKind,
    },
    /// A dwarf picked up the item it reserved
    ItemPickedUp { dwarf: DwarfId, item: ItemId },
    /// A plan was finished and replaced by its structure
    ConstructionComplete {
        dwarf: DwarfId,
        cell: Cell,
        kind: StructureKind,
    },
    /// The search ran out of budget; some dwarves stay idle this tick
    SearchBudgetExhausted { tick: Tick, idle_dwarves: usize },
}

impl SimulationEvent {
    pub(crate) fn from_advance(dwarf: DwarfId, outcome: AdvanceOutcome) -> Option<Self> {
        match outcome {
            AdvanceOutcome::Built { cell, kind } => {
                Some(SimulationEvent::ConstructionComplete { dwarf, cell, kind })
            }
            AdvanceOutcome::Moved | AdvanceOutcome::Stationary | AdvanceOutcome::Worked { .. } => {
                None
            }
        }
    }
}

/// Run a single simulation tick
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    let seekers = claim_in_place(world, &mut events);
    if !seekers.is_empty() {
        search_and_claim(world, &seekers, &mut events);
    }
    release_reservations(world);

    world.tick();
    events
}

/// Let dwarves standing on a job claim it without searching
///
/// Returns the dwarves that still need to search.
fn claim_in_place(world: &mut World, events: &mut Vec<SimulationEvent>) -> Vec<usize> {
    let mut seekers = Vec::new();
    let indices: Vec<usize> = world.dwarves.iter_indices().collect();

    for idx in indices {
        let cell = world.dwarves.cell(idx);
        let held = world.dwarves.held_items[idx];
        if !try_claim(world, idx, cell, held) {
            seekers.push(idx);
            continue;
        }

        let dwarf = world.dwarves.ids[idx];
        if let Some(job) = claimed_job(world, idx) {
            events.push(SimulationEvent::JobClaimed { dwarf, cell, job });
        }
        let outcome = advance(world, idx, waypoint(cell));
        events.extend(SimulationEvent::from_advance(dwarf, outcome));
    }

    seekers
}

/// Drop every reservation made during the tick
fn release_reservations(world: &mut World) {
    let indices: Vec<usize> = world.dwarves.iter_indices().collect();
    for idx in indices {
        return_work(world, idx);
    }
}
