use crate::board::Board;
use crate::moves::Step;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// A board and the steps that led to it from the initial board.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub board: Board,
    pub path: Vec<Step>,
    pub cost: u32,
}

impl Node {
    pub fn root(board: Board) -> Self {
        Self {
            board,
            path: Vec::new(),
            cost: 0,
        }
    }

    pub fn child(&self, step: Step, board: Board) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(step);
        Self {
            board,
            path,
            cost: self.cost + 1,
        }
    }
}

/// The order in which pending nodes are taken decides the strategy.
pub(crate) trait Frontier {
    fn push(&mut self, node: Node);
    fn pop(&mut self) -> Option<Node>;
    fn len(&self) -> usize;
}

/// Breadth-first: oldest node first.
#[derive(Default)]
pub(crate) struct Fifo(VecDeque<Node>);

impl Frontier for Fifo {
    fn push(&mut self, node: Node) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<Node> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Depth-first: newest node first.
#[derive(Default)]
pub(crate) struct Lifo(Vec<Node>);

impl Frontier for Lifo {
    fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<Node> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

struct Queued {
    cost: u32,
    seq: u64,
    node: Node,
}

// Ordered by (cost, insertion sequence). The sequence is unique per queue,
// so board contents never take part in the comparison.
impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cost, self.seq).cmp(&(other.cost, other.seq))
    }
}

/// Uniform-cost: cheapest path first, earliest insertion on ties.
#[derive(Default)]
pub(crate) struct CostQueue {
    heap: BinaryHeap<Reverse<Queued>>,
    next_seq: u64,
}

impl Frontier for CostQueue {
    fn push(&mut self, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Queued {
            cost: node.cost,
            seq,
            node,
        }));
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|Reverse(queued)| queued.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
