//! Spatial primitives: cells, points, waypoints and bounding boxes

pub mod grid;

pub use grid::{waypoint, Aabb, Cell, Point, CELL_HEIGHT, CELL_WIDTH, DWARF_HEIGHT, DWARF_WIDTH};
