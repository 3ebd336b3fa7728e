//! Built structures occupying grid cells

use serde::{Deserialize, Serialize};

use crate::city::items::ItemType;
use crate::core::types::DwarfId;

/// Kind of structure that can occupy a cell
///
/// The absence of a structure is modelled with `Option`, never with a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Permits vertical travel through its cell
    Staircase,
    /// Permits horizontal travel underground
    Corridor,
    /// Operated by a dwarf carrying its input resource
    ProductionFarm,
}

impl StructureKind {
    /// Resource a dwarf must carry to operate this structure
    pub fn required_input(&self) -> Option<ItemType> {
        match self {
            StructureKind::ProductionFarm => Some(ItemType::Spore),
            StructureKind::Staircase | StructureKind::Corridor => None,
        }
    }

    /// Whether dwarves can move up and down through this structure
    pub fn permits_vertical_travel(&self) -> bool {
        matches!(self, StructureKind::Staircase)
    }

    /// Texture used by rendering collaborators
    pub fn texture_name(&self) -> &'static str {
        match self {
            StructureKind::Staircase => "staircase.png",
            StructureKind::Corridor => "corridor.png",
            StructureKind::ProductionFarm => "mushroom_farm.png",
        }
    }
}

/// A built structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    /// Dwarf operating this structure during the current tick
    pub assignee: Option<DwarfId>,
}

impl Structure {
    pub fn new(kind: StructureKind) -> Self {
        Self {
            kind,
            assignee: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.assignee.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_farm_needs_input() {
        assert_eq!(
            StructureKind::ProductionFarm.required_input(),
            Some(ItemType::Spore)
        );
        assert_eq!(StructureKind::Staircase.required_input(), None);
        assert_eq!(StructureKind::Corridor.required_input(), None);
    }

    #[test]
    fn test_only_staircase_is_vertical() {
        assert!(StructureKind::Staircase.permits_vertical_travel());
        assert!(!StructureKind::Corridor.permits_vertical_travel());
        assert!(!StructureKind::ProductionFarm.permits_vertical_travel());
    }

    #[test]
    fn test_new_structure_is_unassigned() {
        let s = Structure::new(StructureKind::Corridor);
        assert!(s.is_available());
    }

    #[test]
    fn test_kind_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: StructureKind,
        }
        let w: Wrapper = toml::from_str("kind = \"production_farm\"").unwrap();
        assert_eq!(w.kind, StructureKind::ProductionFarm);
        assert!(toml::from_str::<Wrapper>("kind = \"moat\"").is_err());
    }
}
