use std::cmp::Ordering;

use crate::tools::freq_count::Symbol;

/// Symbol value internal nodes use when they are compared in the merge queue.
pub const MERGED_SYMBOL: u8 = b'#';

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(Symbol),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf node
    pub fn leaf(symbol: Symbol, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Merge two nodes. The weight is the sum of both children.
    pub fn merge(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight.saturating_add(right.weight),
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// Position of a node in the merge queue. Ordered by ascending weight, then
/// ascending symbol value, then ascending creation sequence.
///
/// Leaves use their own symbol and sequence 0. Internal nodes use
/// [`MERGED_SYMBOL`] and the number of the merge that created them, so two
/// keys only compare equal when they belong to the same node.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PriorityKey {
    pub weight: u64,
    pub symbol: u8,
    pub seq: u32,
}

impl PriorityKey {
    pub fn for_leaf(symbol: Symbol, weight: u64) -> Self {
        Self {
            weight,
            symbol: symbol.value(),
            seq: 0,
        }
    }

    pub fn for_merge(weight: u64, seq: u32) -> Self {
        Self {
            weight,
            symbol: MERGED_SYMBOL,
            seq,
        }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.symbol.cmp(&other.symbol))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sym(b: u8) -> Symbol {
        Symbol::try_from(b).unwrap()
    }

    #[test]
    fn weight_first_test() {
        let light = PriorityKey::for_leaf(sym(b'z'), 1);
        let heavy = PriorityKey::for_leaf(sym(b'a'), 2);
        assert!(light < heavy);
    }

    #[test]
    fn symbol_breaks_ties_test() {
        let a = PriorityKey::for_leaf(sym(b'a'), 5);
        let b = PriorityKey::for_leaf(sym(b'b'), 5);
        assert!(a < b);
        // A merged node ties like '#'
        let merged = PriorityKey::for_merge(5, 1);
        assert!(PriorityKey::for_leaf(sym(b'\n'), 5) < merged);
        assert!(merged < a);
    }

    #[test]
    fn sequence_breaks_remaining_ties_test() {
        let hash_leaf = PriorityKey::for_leaf(sym(b'#'), 4);
        let first = PriorityKey::for_merge(4, 1);
        let second = PriorityKey::for_merge(4, 2);
        assert!(hash_leaf < first);
        assert!(first < second);
    }

    #[test]
    fn merge_test() {
        let node = Node::merge(Node::leaf(sym(b'a'), 2), Node::leaf(sym(b'b'), 3));
        assert_eq!(node.weight, 5);
        assert!(!node.is_leaf());
    }
}
