//! Tile grid geometry
//!
//! Positions are integer world units with y growing downward. Row 0 is the
//! surface; every row below it is underground.

use serde::{Deserialize, Serialize};

/// Width of a cell in world units
pub const CELL_WIDTH: i64 = 100;
/// Height of a cell in world units
pub const CELL_HEIGHT: i64 = 200;

/// Width of a dwarf's bounding box
pub const DWARF_WIDTH: i64 = 82;
/// Height of a dwarf's bounding box
pub const DWARF_HEIGHT: i64 = 100;

/// Discrete grid coordinate
///
/// Ordered row-major, which keeps any ordered container of cells stable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Cell {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn is_surface(&self) -> bool {
        self.row == 0
    }

    pub fn east(&self) -> Cell {
        Cell::new(self.row, self.col + 1)
    }

    pub fn west(&self) -> Cell {
        Cell::new(self.row, self.col - 1)
    }

    pub fn south(&self) -> Cell {
        Cell::new(self.row + 1, self.col)
    }

    pub fn north(&self) -> Cell {
        Cell::new(self.row - 1, self.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl From<Point> for Cell {
    fn from(point: Point) -> Self {
        Cell::new(
            point.y.div_euclid(CELL_HEIGHT),
            point.x.div_euclid(CELL_WIDTH),
        )
    }
}

/// Position in world units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub y: i64,
    pub x: i64,
}

impl Point {
    pub const fn new(y: i64, x: i64) -> Self {
        Self { y, x }
    }

    /// Manhattan distance
    pub fn manhattan(&self, other: &Point) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<Cell> for Point {
    /// Origin (top-left corner) of the cell
    fn from(cell: Cell) -> Self {
        Point::new(cell.row * CELL_HEIGHT, cell.col * CELL_WIDTH)
    }
}

/// Movement target inside a cell: bottom row, horizontally centred
///
/// Dwarves are anchored at their feet, so standing on the waypoint keeps them
/// visually inside the tile.
pub fn waypoint(cell: Cell) -> Point {
    Point::new(
        (cell.row + 1) * CELL_HEIGHT - 1,
        cell.col * CELL_WIDTH + CELL_WIDTH / 2,
    )
}

/// Axis-aligned bounding box with inclusive edges
///
/// `bottom >= top` since the y axis grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Aabb {
    pub fn of_cell(cell: Cell) -> Self {
        Self {
            left: cell.col * CELL_WIDTH,
            right: (cell.col + 1) * CELL_WIDTH - 1,
            top: cell.row * CELL_HEIGHT,
            bottom: (cell.row + 1) * CELL_HEIGHT - 1,
        }
    }

    /// Box of a dwarf standing with its feet at `feet`
    pub fn of_dwarf(feet: Point) -> Self {
        Self {
            left: feet.x - DWARF_WIDTH / 2,
            right: feet.x + DWARF_WIDTH / 2,
            top: feet.y - DWARF_HEIGHT,
            bottom: feet.y,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}
