//! Colony inhabitants

pub mod names;
pub mod species;

pub use names::NameGenerator;
pub use species::DwarfArchetype;
