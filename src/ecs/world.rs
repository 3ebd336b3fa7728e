//! World - owns every registry the scheduler reads and mutates

use serde::Serialize;

use crate::city::building::StructureKind;
use crate::city::construction::PlanToggle;
use crate::city::items::{ItemRegistry, ItemType};
use crate::city::registry::StructureRegistry;
use crate::core::config::SimulationConfig;
use crate::core::error::{BunkerError, Result};
use crate::core::types::{DwarfId, ItemId, Tick};
use crate::entity::names::NameGenerator;
use crate::entity::species::dwarf::DwarfArchetype;
use crate::spatial::grid::{waypoint, Cell, Point};

/// The game world containing all dwarves, structures, plans and items
pub struct World {
    pub current_tick: Tick,
    pub config: SimulationConfig,
    pub dwarves: DwarfArchetype,
    pub structures: StructureRegistry,
    pub items: ItemRegistry,
    names: NameGenerator,
}

/// Read-only view of a dwarf for rendering collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DwarfView {
    pub id: DwarfId,
    pub name: String,
    pub position: Point,
    pub held_item: Option<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureView {
    pub cell: Cell,
    pub kind: StructureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    pub cell: Cell,
    pub kind: StructureKind,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub item_type: ItemType,
    pub position: Point,
    pub carrier: Option<DwarfId>,
}

/// Serializable picture of the whole world, sorted for stable output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub dwarves: Vec<DwarfView>,
    pub structures: Vec<StructureView>,
    pub plans: Vec<PlanView>,
    pub items: Vec<ItemView>,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            current_tick: 0,
            dwarves: DwarfArchetype::new(),
            structures: StructureRegistry::new(config.construction_steps),
            items: ItemRegistry::new(),
            names: NameGenerator::with_seed(config.name_seed),
            config,
        }
    }

    /// Spawn a named dwarf standing on the waypoint of `cell`
    pub fn spawn_dwarf(&mut self, name: String, cell: Cell) -> DwarfId {
        let id = self
            .dwarves
            .spawn(name, waypoint(cell), self.current_tick);
        tracing::info!(
            dwarf = id.0,
            cell = %cell,
            "{} says: Hello!",
            self.dwarves.names[id.index()]
        );
        id
    }

    /// Spawn a dwarf with a generated name
    pub fn spawn_random_dwarf(&mut self, cell: Cell) -> DwarfId {
        let name = self.names.generate();
        self.spawn_dwarf(name, cell)
    }

    pub fn add_structure(&mut self, cell: Cell, kind: StructureKind) {
        self.structures.add_structure(cell, kind);
    }

    pub fn add_item(&mut self, position: Point, item_type: ItemType) -> ItemId {
        self.items.add_item(position, item_type)
    }

    pub fn toggle_plan(&mut self, cell: Cell, kind: StructureKind) -> PlanToggle {
        let outcome = self.structures.toggle_plan(cell, kind);
        tracing::debug!(cell = %cell, ?kind, ?outcome, "Plan toggled");
        outcome
    }

    pub fn dwarf_count(&self) -> usize {
        self.dwarves.count()
    }

    pub fn dwarf(&self, id: DwarfId) -> Result<DwarfView> {
        let idx = self
            .dwarves
            .index_of(id)
            .ok_or(BunkerError::DwarfNotFound(id))?;
        Ok(self.dwarf_view(idx))
    }

    fn dwarf_view(&self, idx: usize) -> DwarfView {
        DwarfView {
            id: self.dwarves.ids[idx],
            name: self.dwarves.names[idx].clone(),
            position: self.dwarves.positions[idx],
            held_item: self.dwarves.held_items[idx],
        }
    }

    pub fn dwarf_views(&self) -> impl Iterator<Item = DwarfView> + '_ {
        self.dwarves.iter_indices().map(|idx| self.dwarf_view(idx))
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut structures: Vec<StructureView> = self
            .structures
            .structures()
            .map(|(cell, s)| StructureView {
                cell: *cell,
                kind: s.kind,
            })
            .collect();
        structures.sort_by_key(|s| s.cell);

        let mut plans: Vec<PlanView> = self
            .structures
            .plans()
            .map(|(cell, p)| PlanView {
                cell: *cell,
                kind: p.kind,
                progress: p.progress(),
            })
            .collect();
        plans.sort_by_key(|p| p.cell);

        WorldSnapshot {
            tick: self.current_tick,
            dwarves: self.dwarf_views().collect(),
            structures,
            plans,
            items: self
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id,
                    item_type: item.item_type,
                    position: item.position,
                    carrier: item.carrier,
                })
                .collect(),
        }
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
