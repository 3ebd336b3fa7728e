//! Dwarf work primitives - claiming jobs, moving toward them, doing the work
//!
//! A claim is a reservation that lives for one tick only. Every reservation
//! sets the job's `assignee` and the dwarf's back-reference together, and
//! `return_work` clears both together.

use crate::city::building::StructureKind;
use crate::city::construction::{apply_construction_work, ContributionResult};
use crate::core::types::ItemId;
use crate::ecs::world::World;
use crate::spatial::grid::{Aabb, Cell, Point};

/// What a dwarf reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Building a planned structure
    Construction(StructureKind),
    /// Operating a structure with a carried input
    Production(StructureKind),
}

/// Result of a single `advance` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvanceOutcome {
    /// Position changed
    Moved,
    /// Nothing to move and nothing to build
    Stationary,
    /// Stood still at the plan and added progress
    Worked { cell: Cell, progress: f64 },
    /// Finished the plan; the structure now exists
    Built { cell: Cell, kind: StructureKind },
}

/// Try to reserve the job at `cell`
///
/// Succeeds on an unassigned plan, or on an unassigned production structure
/// when `item` is the input it needs and nobody else reserved it. Mutates
/// nothing on failure.
pub fn try_claim(world: &mut World, idx: usize, cell: Cell, item: Option<ItemId>) -> bool {
    let dwarf = world.dwarves.ids[idx];

    if let Some(plan) = world.structures.plan_mut(cell) {
        if plan.is_available() {
            plan.assignee = Some(dwarf);
            world.dwarves.plans[idx] = Some(cell);
            world.dwarves.destinations[idx] = cell;
            return true;
        }
    }

    let Some(item_id) = item else {
        return false;
    };
    let Some(required) = world
        .structures
        .structure(cell)
        .filter(|s| s.is_available())
        .and_then(|s| s.kind.required_input())
    else {
        return false;
    };
    let Some(candidate) = world.items.get_mut(item_id) else {
        return false;
    };
    if candidate.item_type != required || candidate.assignee.is_some_and(|a| a != dwarf) {
        return false;
    }

    candidate.assignee = Some(dwarf);
    if let Some(structure) = world.structures.structure_mut(cell) {
        structure.assignee = Some(dwarf);
    }
    world.dwarves.structures[idx] = Some(cell);
    world.dwarves.assigned_items[idx] = Some(item_id);
    world.dwarves.destinations[idx] = cell;
    true
}

/// The job a dwarf currently holds, if any
pub fn claimed_job(world: &World, idx: usize) -> Option<JobKind> {
    if let Some(plan) = world.dwarves.plans[idx].and_then(|c| world.structures.plan(c)) {
        return Some(JobKind::Construction(plan.kind));
    }
    world.dwarves.structures[idx]
        .and_then(|c| world.structures.structure(c))
        .map(|s| JobKind::Production(s.kind))
}

/// Step toward `target`, then work on the reserved plan if standing still
///
/// Motion is clamped per axis. When `target` lies in the destination cell and
/// that cell cannot be entered yet, the dwarf is pushed back out of it along
/// the penetrating axis and that axis counts as stationary.
pub fn advance(world: &mut World, idx: usize, target: Point) -> AdvanceOutcome {
    let vertical = world.config.vertical_step;
    let horizontal = world.config.horizontal_step;

    let mut pos = world.dwarves.positions[idx];
    let mut dy = (target.y - pos.y).clamp(-vertical, vertical);
    let mut dx = (target.x - pos.x).clamp(-horizontal, horizontal);
    pos.y += dy;
    pos.x += dx;

    let destination = world.dwarves.destinations[idx];
    let at_destination = Cell::from(target) == destination;

    if at_destination && !world.structures.can_travel(destination) {
        let dwarf_bb = Aabb::of_dwarf(pos);
        let dest_bb = Aabb::of_cell(destination);
        if dx > 0 && dwarf_bb.right >= dest_bb.left {
            pos.x -= dwarf_bb.right - dest_bb.left + 1;
            dx = 0;
        }
        if dx < 0 && dwarf_bb.left <= dest_bb.right {
            pos.x += dest_bb.right - dwarf_bb.left + 1;
            dx = 0;
        }
        if dy > 0 && dwarf_bb.bottom >= dest_bb.top {
            pos.y -= dwarf_bb.bottom - dest_bb.top + 1;
            dy = 0;
        }
        if dy < 0 && dwarf_bb.top <= dest_bb.bottom {
            pos.y += dest_bb.bottom - dwarf_bb.top + 1;
            dy = 0;
        }
    }

    world.dwarves.positions[idx] = pos;
    if let Some(held) = world.dwarves.held_items[idx] {
        world.items.sync_position(held, pos);
    }

    if dx != 0 || dy != 0 {
        return AdvanceOutcome::Moved;
    }
    if !at_destination {
        return AdvanceOutcome::Stationary;
    }
    let Some(plan_cell) = world.dwarves.plans[idx] else {
        return AdvanceOutcome::Stationary;
    };
    let Some(plan) = world.structures.plan_mut(plan_cell) else {
        return AdvanceOutcome::Stationary;
    };

    match apply_construction_work(plan) {
        ContributionResult::InProgress { progress } => AdvanceOutcome::Worked {
            cell: plan_cell,
            progress,
        },
        ContributionResult::Completed => {
            world.dwarves.plans[idx] = None;
            match world.structures.complete_plan(plan_cell) {
                Some(kind) => {
                    tracing::info!(
                        dwarf = %world.dwarves.names[idx],
                        cell = %plan_cell,
                        ?kind,
                        "Construction complete"
                    );
                    AdvanceOutcome::Built {
                        cell: plan_cell,
                        kind,
                    }
                }
                None => AdvanceOutcome::Stationary,
            }
        }
    }
}

/// Take `item` into the dwarf's hands
pub fn pick_up(world: &mut World, idx: usize, item: ItemId) {
    let dwarf = world.dwarves.ids[idx];
    let pos = world.dwarves.positions[idx];
    if let Some(entry) = world.items.get_mut(item) {
        entry.carrier = Some(dwarf);
        entry.position = pos;
        world.dwarves.held_items[idx] = Some(item);
    }
}

/// Release every reservation the dwarf holds
pub fn return_work(world: &mut World, idx: usize) {
    let dwarf = world.dwarves.ids[idx];

    if let Some(cell) = world.dwarves.plans[idx].take() {
        if let Some(plan) = world.structures.plan_mut(cell) {
            if plan.assignee == Some(dwarf) {
                plan.assignee = None;
            }
        }
    }
    if let Some(cell) = world.dwarves.structures[idx].take() {
        if let Some(structure) = world.structures.structure_mut(cell) {
            if structure.assignee == Some(dwarf) {
                structure.assignee = None;
            }
        }
    }
    if let Some(item) = world.dwarves.assigned_items[idx].take() {
        world.items.release(item, dwarf);
    }
}
