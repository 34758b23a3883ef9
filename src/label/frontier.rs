//! Best-first work list of cells.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::Cell;

/// Heap entry keyed on the cell's upper bound.
///
/// Equal bounds pop in insertion order so a search is reproducible.
struct FrontierEntry {
    max: OrderedFloat<f64>,
    seq: u64,
    cell: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.max
            .cmp(&other.max)
            // BinaryHeap is a max-heap: lower seq must compare greater
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Max-priority queue of cells ordered by upper bound
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Cell) {
        self.heap.push(FrontierEntry {
            max: OrderedFloat(cell.max()),
            seq: self.pushed,
            cell,
        });
        self.pushed += 1;
    }

    /// Remove the cell with the greatest upper bound
    pub fn pop(&mut self) -> Option<Cell> {
        self.heap.pop().map(|entry| entry.cell)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
