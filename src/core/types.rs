//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Stable identifier for a dwarf
///
/// Dwarves are numbered in creation order, which also fixes the order in
/// which they are scheduled each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DwarfId(pub u32);

impl DwarfId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier for an item in the item registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;
