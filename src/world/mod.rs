//! Scenario setup

pub mod loader;

pub use loader::{LoadError, Scenario};
