//! Load starting layouts from TOML scenario files
//!
//! A scenario lists dwarves, built structures, pending plans and loose items.
//! `Scenario::build` turns it into a ready-to-tick `World`.

use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::city::building::StructureKind;
use crate::city::items::ItemType;
use crate::core::config::SimulationConfig;
use crate::ecs::world::World;
use crate::spatial::grid::{Cell, Point};

/// Errors that can occur when loading a scenario
#[derive(Debug, Error)]
pub enum LoadError {
    /// TOML parsing failed (including unknown structure or item kinds)
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    /// Two plans on one cell would cancel each other out
    #[error("Duplicate plan at {0}")]
    DuplicatePlan(Cell),
    /// A placement left of or above the grid
    #[error("Negative cell coordinates: {0}")]
    OutOfBounds(Cell),
    /// File I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwarfPlacement {
    pub row: i64,
    pub col: i64,
    /// Generated when absent
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructurePlacement {
    pub row: i64,
    pub col: i64,
    pub kind: StructureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub y: i64,
    pub x: i64,
    pub kind: ItemType,
}

/// A starting layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub dwarves: Vec<DwarfPlacement>,
    pub structures: Vec<StructurePlacement>,
    pub plans: Vec<StructurePlacement>,
    pub items: Vec<ItemPlacement>,
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file from disk
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Two dwarves, a staircase shaft down to row 3, a corridor leading to a
    /// farm, and a spore lying on the surface
    pub fn starter_bunker() -> Self {
        let structure = |row, col, kind| StructurePlacement { row, col, kind };
        Self {
            dwarves: vec![
                DwarfPlacement {
                    row: 0,
                    col: 2,
                    name: None,
                },
                DwarfPlacement {
                    row: 2,
                    col: 5,
                    name: None,
                },
            ],
            structures: vec![
                structure(1, 5, StructureKind::Staircase),
                structure(2, 5, StructureKind::Staircase),
                structure(3, 5, StructureKind::Staircase),
                structure(3, 4, StructureKind::Corridor),
                structure(3, 3, StructureKind::Corridor),
                structure(3, 2, StructureKind::ProductionFarm),
            ],
            plans: Vec::new(),
            items: vec![ItemPlacement {
                y: 100,
                x: 800,
                kind: ItemType::Spore,
            }],
        }
    }

    fn validate(&self) -> Result<(), LoadError> {
        let cells = self
            .dwarves
            .iter()
            .map(|d| Cell::new(d.row, d.col))
            .chain(self.structures.iter().map(|s| Cell::new(s.row, s.col)))
            .chain(self.plans.iter().map(|p| Cell::new(p.row, p.col)));
        for cell in cells {
            if cell.row < 0 || cell.col < 0 {
                return Err(LoadError::OutOfBounds(cell));
            }
        }

        let mut planned = AHashSet::new();
        for plan in &self.plans {
            let cell = Cell::new(plan.row, plan.col);
            if !planned.insert(cell) {
                return Err(LoadError::DuplicatePlan(cell));
            }
        }
        Ok(())
    }

    /// Create a world populated with this scenario
    pub fn build(&self, config: SimulationConfig) -> World {
        let mut world = World::with_config(config);

        for s in &self.structures {
            world.add_structure(Cell::new(s.row, s.col), s.kind);
        }
        for p in &self.plans {
            world.toggle_plan(Cell::new(p.row, p.col), p.kind);
        }
        for item in &self.items {
            world.add_item(Point::new(item.y, item.x), item.kind);
        }
        for d in &self.dwarves {
            let cell = Cell::new(d.row, d.col);
            if !world.structures.can_travel(cell) {
                tracing::warn!(
                    cell = %cell,
                    "Dwarf placed inside solid rock; it cannot move until something is built there"
                );
            }
            match &d.name {
                Some(name) => world.spawn_dwarf(name.clone(), cell),
                None => world.spawn_random_dwarf(cell),
            };
        }

        tracing::info!(
            dwarves = world.dwarf_count(),
            structures = world.structures.structure_count(),
            plans = world.structures.plan_count(),
            items = world.items.len(),
            "Scenario loaded"
        );
        world
    }
}
