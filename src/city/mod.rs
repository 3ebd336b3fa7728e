//! City layer - structures, construction plans, and loose items

pub mod building;
pub mod construction;
pub mod items;
pub mod registry;

pub use building::{Structure, StructureKind};
pub use construction::{apply_construction_work, ContributionResult, Plan, PlanToggle};
pub use items::{Item, ItemRegistry, ItemType};
pub use registry::StructureRegistry;
