//! Job search - one shared frontier for every dwarf still looking for work
//!
//! All searching dwarves expand from a single cost-ordered frontier, so the
//! dwarf with the cheapest reachable job claims first no matter where it sits
//! in the dwarf list. Each dwarf keeps its own back-pointer tree keyed by
//! `(cell, carried item)`: picking up an item is a separate search state,
//! which lets a dwarf plan "grab that spore, then go to the farm".

use ahash::AHashMap;

use crate::city::building::StructureKind;
use crate::ecs::world::World;
use crate::simulation::frontier::{Frontier, SearchNode, Visit};
use crate::simulation::tick::SimulationEvent;
use crate::simulation::work::{advance, claimed_job, pick_up, try_claim};
use crate::spatial::grid::waypoint;

/// Cost of a horizontal step (or of picking up an item)
const HORIZONTAL_COST: u32 = 1;
/// Cost of a step between rows
const VERTICAL_COST: u32 = 2;

/// Summary of one search pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Frontier entries expanded
    pub expansions: usize,
    /// Dwarves that claimed a job and moved
    pub settled: usize,
    /// Whether the expansion budget ran out
    pub budget_exhausted: bool,
}

struct JobSearch {
    frontier: Frontier,
    trees: Vec<AHashMap<SearchNode, SearchNode>>,
    starts: Vec<SearchNode>,
    settled: Vec<bool>,
}

impl JobSearch {
    fn new(world: &World) -> Self {
        let count = world.dwarves.count();
        let starts = world
            .dwarves
            .iter_indices()
            .map(|idx| SearchNode::new(world.dwarves.cell(idx), world.dwarves.held_items[idx]))
            .collect();
        Self {
            frontier: Frontier::new(),
            trees: vec![AHashMap::new(); count],
            starts,
            settled: vec![false; count],
        }
    }

    /// Consider moving from the visited node to `next`
    ///
    /// Returns true when the dwarf claimed a job at `next` and has moved.
    fn consider(
        &mut self,
        world: &mut World,
        visit: &Visit,
        next: SearchNode,
        events: &mut Vec<SimulationEvent>,
    ) -> bool {
        let current = visit.node;
        let mut cost = visit.cost;
        let going_up = next.cell.row == current.cell.row - 1;
        let going_down = next.cell.row == current.cell.row + 1;

        if going_up {
            if !world.structures.can_travel_vertically(current.cell) {
                return false;
            }
            cost += VERTICAL_COST;
        }

        // A staircase under construction may be claimed from above
        let may_claim =
            !going_down || world.structures.is_planned(next.cell, StructureKind::Staircase);
        if may_claim && try_claim(world, visit.dwarf, next.cell, next.item) {
            self.settle(world, visit, next, events);
            return true;
        }

        if next.cell.row == current.cell.row {
            if !world.structures.can_travel(next.cell) {
                return false;
            }
            cost += HORIZONTAL_COST;
        }
        if going_down {
            if !world.structures.can_travel_vertically(next.cell) {
                return false;
            }
            cost += VERTICAL_COST;
        }

        self.frontier.push(cost, visit.dwarf, next, current);
        false
    }

    /// Walk the tree back to the dwarf's start and take the first step
    fn settle(
        &mut self,
        world: &mut World,
        visit: &Visit,
        target: SearchNode,
        events: &mut Vec<SimulationEvent>,
    ) {
        let idx = visit.dwarf;
        self.settled[idx] = true;
        let start = self.starts[idx];
        let tree = &self.trees[idx];

        let mut step = target;
        let mut prev = visit.node;
        while prev != start {
            step = prev;
            match tree.get(&prev) {
                Some(&p) => prev = p,
                None => break,
            }
        }

        let dwarf = world.dwarves.ids[idx];
        if let Some(job) = claimed_job(world, idx) {
            tracing::debug!(
                dwarf = %world.dwarves.names[idx],
                job_cell = %target.cell,
                next_cell = %step.cell,
                cost = visit.cost,
                "Claimed job"
            );
            events.push(SimulationEvent::JobClaimed {
                dwarf,
                cell: target.cell,
                job,
            });
        }

        // Look one waypoint ahead so a dwarf already past the centre of its
        // cell does not walk back to it
        let first = waypoint(start.cell);
        let second = waypoint(step.cell);
        let block_dist = first.manhattan(&second);
        let my_dist = world.dwarves.positions[idx].manhattan(&second);

        let outcome = if my_dist <= block_dist {
            if step.item != start.item {
                if let Some(item) = step.item {
                    if world.dwarves.assigned_items[idx] == Some(item) {
                        pick_up(world, idx, item);
                        tracing::debug!(dwarf = %world.dwarves.names[idx], ?item, "Picked up item");
                        events.push(SimulationEvent::ItemPickedUp { dwarf, item });
                    }
                }
            }
            advance(world, idx, second)
        } else {
            advance(world, idx, first)
        };
        events.extend(SimulationEvent::from_advance(dwarf, outcome));
    }
}

/// Search for and claim the nearest job for every dwarf in `seekers`
///
/// Dwarves not settled before the frontier empties or the expansion budget
/// runs out stay idle this tick.
pub fn search_and_claim(
    world: &mut World,
    seekers: &[usize],
    events: &mut Vec<SimulationEvent>,
) -> SearchReport {
    let mut search = JobSearch::new(world);
    let mut report = SearchReport::default();
    let budget = world.config.search_budget;

    for &idx in seekers {
        let start = search.starts[idx];
        search.frontier.push(0, idx, start, start);
    }

    while let Some(visit) = search.frontier.pop() {
        if search.settled[visit.dwarf] {
            continue;
        }
        let tree = &mut search.trees[visit.dwarf];
        if tree.contains_key(&visit.node) {
            continue;
        }
        tree.insert(visit.node, visit.from);

        report.expansions += 1;
        if report.expansions > budget {
            report.budget_exhausted = true;
            break;
        }

        if visit.node.item.is_none() {
            let loose: Vec<_> = world.items.loose_items_at(visit.node.cell).collect();
            let mut claimed = false;
            for item in loose {
                if search.consider(world, &visit, visit.node.with_item(item), events) {
                    claimed = true;
                    break;
                }
            }
            if claimed {
                continue;
            }
        }

        for next in visit.node.neighbors() {
            if search.consider(world, &visit, next, events) {
                break;
            }
        }
    }

    report.settled = seekers.iter().filter(|&&idx| search.settled[idx]).count();
    if report.budget_exhausted {
        let idle = seekers.len() - report.settled;
        tracing::debug!(
            expansions = report.expansions - 1,
            idle,
            "Search budget exhausted"
        );
        events.push(SimulationEvent::SearchBudgetExhausted {
            tick: world.current_tick,
            idle_dwarves: idle,
        });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::items::ItemType;
    use crate::spatial::grid::{Cell, Point};

    #[test]
    fn test_claims_adjacent_plan_and_steps_toward_it() {
        let mut world = World::new();
        let idx = world.spawn_dwarf("A".into(), Cell::new(0, 1)).index();
        world.toggle_plan(Cell::new(0, 3), StructureKind::Corridor);

        let mut events = Vec::new();
        let report = search_and_claim(&mut world, &[idx], &mut events);

        assert_eq!(report.settled, 1);
        assert!(!report.budget_exhausted);
        assert_eq!(world.dwarves.plans[idx], Some(Cell::new(0, 3)));
        assert_eq!(world.dwarves.positions[idx], Point::new(199, 155));
    }

    #[test]
    fn test_no_reachable_job_underground() {
        let mut world = World::new();
        world.add_structure(Cell::new(2, 2), StructureKind::Corridor);
        let idx = world.spawn_dwarf("A".into(), Cell::new(2, 2)).index();
        // Plan two cells away through solid rock
        world.toggle_plan(Cell::new(2, 4), StructureKind::Corridor);

        let mut events = Vec::new();
        let report = search_and_claim(&mut world, &[idx], &mut events);
        assert_eq!(report.settled, 0);
        assert!(!report.budget_exhausted);
        assert_eq!(world.dwarves.positions[idx], waypoint(Cell::new(2, 2)));
    }

    #[test]
    fn test_budget_exhaustion_reported() {
        let mut world = World::new();
        world.config.search_budget = 10;
        let idx = world.spawn_dwarf("A".into(), Cell::new(0, 0)).index();
        world.toggle_plan(Cell::new(0, 50), StructureKind::Staircase);

        let mut events = Vec::new();
        let report = search_and_claim(&mut world, &[idx], &mut events);
        assert!(report.budget_exhausted);
        assert_eq!(report.settled, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::SearchBudgetExhausted { idle_dwarves: 1, .. })));
    }

    #[test]
    fn test_cannot_climb_without_staircase() {
        let mut world = World::new();
        world.add_structure(Cell::new(1, 1), StructureKind::Corridor);
        world.add_structure(Cell::new(1, 2), StructureKind::Corridor);
        let idx = world.spawn_dwarf("A".into(), Cell::new(1, 1)).index();
        world.toggle_plan(Cell::new(0, 1), StructureKind::Staircase);

        let mut events = Vec::new();
        let report = search_and_claim(&mut world, &[idx], &mut events);
        assert_eq!(report.settled, 0);
    }

    #[test]
    fn test_spore_branch_claims_farm() {
        let mut world = World::new();
        let idx = world.spawn_dwarf("A".into(), Cell::new(0, 2)).index();
        world.add_item(Point::new(100, 350), ItemType::Spore);
        world.add_structure(Cell::new(0, 4), StructureKind::ProductionFarm);

        let mut events = Vec::new();
        search_and_claim(&mut world, &[idx], &mut events);

        assert_eq!(world.dwarves.structures[idx], Some(Cell::new(0, 4)));
        assert!(world.dwarves.assigned_items[idx].is_some());
        // Still walking toward the spore's cell
        assert_eq!(world.dwarves.held_items[idx], None);
        assert_eq!(world.dwarves.positions[idx], Point::new(199, 255));
    }
}
