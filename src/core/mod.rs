pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{BunkerError, Result};
pub use types::{DwarfId, ItemId, Tick};
