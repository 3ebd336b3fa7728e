//! Item registry - loose resources lying on the grid
//!
//! Items are never removed. The cell index is keyed by the cell an item was
//! added at; a carried item moves with its carrier, so pickup queries always
//! re-check an item's live position instead of trusting the index key.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{DwarfId, ItemId};
use crate::spatial::grid::{Cell, Point};

/// Type of a loose resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Spore,
}

impl ItemType {
    /// Sprite size (width, height) in world units
    pub fn size(&self) -> (i64, i64) {
        match self {
            ItemType::Spore => (27, 26),
        }
    }

    pub fn texture_name(&self) -> &'static str {
        match self {
            ItemType::Spore => "mushroom.png",
        }
    }
}

/// A single resource unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub item_type: ItemType,
    pub position: Point,
    /// Dwarf currently holding the item
    pub carrier: Option<DwarfId>,
    /// Dwarf that reserved the item during the current tick
    pub assignee: Option<DwarfId>,
}

impl Item {
    pub fn cell(&self) -> Cell {
        Cell::from(self.position)
    }

    pub fn is_carried(&self) -> bool {
        self.carrier.is_some()
    }
}

/// Arena of items plus a multi-valued cell index
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    by_cell: AHashMap<Cell, Vec<ItemId>>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item at `position`
    pub fn add_item(&mut self, position: Point, item_type: ItemType) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Item {
            id,
            item_type,
            position,
            carrier: None,
            assignee: None,
        });
        self.by_cell.entry(Cell::from(position)).or_default().push(id);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.index())
    }

    /// Items lying loose in `cell`, in insertion order
    ///
    /// Carried items and items whose live position has left the indexed cell
    /// are skipped.
    pub fn loose_items_at(&self, cell: Cell) -> impl Iterator<Item = ItemId> + '_ {
        self.by_cell
            .get(&cell)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |id| {
                self.get(*id)
                    .is_some_and(|item| !item.is_carried() && item.cell() == cell)
            })
    }

    /// Move an item to follow its carrier
    pub fn sync_position(&mut self, id: ItemId, position: Point) {
        if let Some(item) = self.get_mut(id) {
            item.position = position;
        }
    }

    /// Clear an item's reservation if it belongs to `dwarf`
    pub fn release(&mut self, id: ItemId, dwarf: DwarfId) {
        if let Some(item) = self.get_mut(id) {
            if item.assignee == Some(dwarf) {
                item.assignee = None;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
