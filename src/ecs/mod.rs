pub mod world;

pub use world::{DwarfView, World, WorldSnapshot};
