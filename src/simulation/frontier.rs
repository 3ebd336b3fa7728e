//! Cost-ordered search frontier shared by every searching dwarf
//!
//! Entries with equal cost pop in insertion order. The scheduler's fairness
//! between dwarves depends on this, so the heap key carries a sequence number.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::types::ItemId;
use crate::spatial::grid::Cell;

/// A search state: where the dwarf would be, and which item it would carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchNode {
    pub cell: Cell,
    pub item: Option<ItemId>,
}

impl SearchNode {
    pub fn new(cell: Cell, item: Option<ItemId>) -> Self {
        Self { cell, item }
    }

    /// Same cell, carrying `item` instead
    pub fn with_item(&self, item: ItemId) -> Self {
        Self {
            cell: self.cell,
            item: Some(item),
        }
    }

    /// Neighbours in fixed priority order: east, west, south, north
    ///
    /// West and north are omitted at the grid's left edge and at the surface.
    pub fn neighbors(&self) -> impl Iterator<Item = SearchNode> + '_ {
        let cell = self.cell;
        [
            Some(cell.east()),
            (cell.col > 0).then(|| cell.west()),
            Some(cell.south()),
            (cell.row > 0).then(|| cell.north()),
        ]
        .into_iter()
        .flatten()
        .map(move |next| SearchNode::new(next, self.item))
    }
}

/// A popped frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub cost: u32,
    /// Dwarf index
    pub dwarf: usize,
    pub node: SearchNode,
    /// Node this one was reached from (itself for a start node)
    pub from: SearchNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    seq: u64,
    visit: Visit,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .visit
            .cost
            .cmp(&self.visit.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue on cost, FIFO among equal costs
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cost: u32, dwarf: usize, node: SearchNode, from: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            seq,
            visit: Visit {
                cost,
                dwarf,
                node,
                from,
            },
        });
    }

    pub fn pop(&mut self) -> Option<Visit> {
        self.heap.pop().map(|entry| entry.visit)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(row: i64, col: i64) -> SearchNode {
        SearchNode::new(Cell::new(row, col), None)
    }

    #[test]
    fn test_pops_cheapest_first() {
        let mut frontier = Frontier::new();
        frontier.push(5, 0, node(0, 5), node(0, 5));
        frontier.push(1, 0, node(0, 1), node(0, 1));
        frontier.push(3, 0, node(0, 3), node(0, 3));

        let costs: Vec<u32> = std::iter::from_fn(|| frontier.pop())
            .map(|v| v.cost)
            .collect();
        assert_eq!(costs, vec![1, 3, 5]);
    }

    #[test]
    fn test_equal_costs_are_fifo() {
        let mut frontier = Frontier::new();
        for col in 0..20 {
            frontier.push(2, col as usize, node(0, col), node(0, col));
        }
        frontier.push(1, 99, node(9, 9), node(9, 9));

        assert_eq!(frontier.pop().unwrap().dwarf, 99);
        for col in 0..20 {
            let visit = frontier.pop().unwrap();
            assert_eq!(visit.dwarf, col as usize);
        }
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_neighbor_order_and_edges() {
        let inner: Vec<Cell> = node(2, 2).neighbors().map(|n| n.cell).collect();
        assert_eq!(
            inner,
            vec![
                Cell::new(2, 3),
                Cell::new(2, 1),
                Cell::new(3, 2),
                Cell::new(1, 2)
            ]
        );

        let corner: Vec<Cell> = node(0, 0).neighbors().map(|n| n.cell).collect();
        assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn test_neighbors_keep_item_context() {
        let carrying = SearchNode::new(Cell::new(1, 1), Some(ItemId(4)));
        assert!(carrying.neighbors().all(|n| n.item == Some(ItemId(4))));
        assert_eq!(node(1, 1).with_item(ItemId(2)).item, Some(ItemId(2)));
    }
}
