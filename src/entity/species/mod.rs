pub mod dwarf;

pub use dwarf::DwarfArchetype;
