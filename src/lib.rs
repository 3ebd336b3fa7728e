//! Bunker Builder - underground colony simulation
//!
//! Dwarves find the nearest job each tick, reserve it against each other,
//! and take one step toward it.

pub mod city;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
