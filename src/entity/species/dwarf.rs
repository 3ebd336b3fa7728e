//! Dwarf archetype with SoA layout
//!
//! Dwarves are the colony's only workers. Each one carries at most one item
//! and holds at most one job reservation (a plan or a structure) at a time.

use crate::core::types::{DwarfId, ItemId, Tick};
use crate::spatial::grid::{Cell, Point};

/// Structure of Arrays for dwarf entities
///
/// Index `i` in every array belongs to `DwarfId(i)`.
#[derive(Debug, Clone, Default)]
pub struct DwarfArchetype {
    pub ids: Vec<DwarfId>,
    pub names: Vec<String>,
    pub birth_ticks: Vec<Tick>,
    /// Feet position in world units
    pub positions: Vec<Point>,
    /// Item held in hands
    pub held_items: Vec<Option<ItemId>>,
    /// Cell of the plan reserved this tick
    pub plans: Vec<Option<Cell>>,
    /// Cell of the structure reserved this tick
    pub structures: Vec<Option<Cell>>,
    /// Item reserved for pickup this tick
    pub assigned_items: Vec<Option<ItemId>>,
    /// Cell of the reserved job
    pub destinations: Vec<Cell>,
}

impl DwarfArchetype {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn spawn(&mut self, name: String, position: Point, tick: Tick) -> DwarfId {
        let id = DwarfId(self.ids.len() as u32);
        self.ids.push(id);
        self.names.push(name);
        self.birth_ticks.push(tick);
        self.positions.push(position);
        self.held_items.push(None);
        self.plans.push(None);
        self.structures.push(None);
        self.assigned_items.push(None);
        self.destinations.push(Cell::default());
        id
    }

    pub fn index_of(&self, id: DwarfId) -> Option<usize> {
        (id.index() < self.count()).then_some(id.index())
    }

    pub fn cell(&self, idx: usize) -> Cell {
        Cell::from(self.positions[idx])
    }

    /// Whether the dwarf reserved a plan or a structure this tick
    pub fn has_job(&self, idx: usize) -> bool {
        self.plans[idx].is_some() || self.structures[idx].is_some()
    }

    /// All dwarves, in creation order
    pub fn iter_indices(&self) -> impl Iterator<Item = usize> {
        0..self.count()
    }
}
