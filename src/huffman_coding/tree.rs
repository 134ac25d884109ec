//! Builds the code tree from a frequency table.
//!
//! The queue is kept as a vec sorted from highest to lowest priority key, so
//! the two lowest nodes are always popped off the end. The alphabet has at
//! most 128 symbols, so re-sorting after each merge costs nothing worth a heap.

use log::{debug, trace};

use super::node::{Node, NodeData, PriorityKey};
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Merge the two lowest nodes until one root is left. The first node
    /// extracted becomes the left child, the second the right.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let mut queue: Vec<(PriorityKey, Node)> = freqs
            .entries()
            .map(|e| (PriorityKey::for_leaf(e.symbol, e.count), Node::leaf(e.symbol, e.count)))
            .collect();

        if queue.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        debug!("Building code tree from {} symbols.", queue.len());

        let mut seq = 0;
        while queue.len() > 1 {
            // Highest key first, so the lowest two are at the end
            queue.sort_unstable_by(|a, b| b.0.cmp(&a.0));

            let (left_key, left) = queue.pop().ok_or(HuffError::EmptyInput)?;
            let (right_key, right) = queue.pop().ok_or(HuffError::EmptyInput)?;
            seq += 1;
            trace!(
                "Merge {}: {:?} + {:?}",
                seq,
                (left_key.symbol as char, left_key.weight),
                (right_key.symbol as char, right_key.weight)
            );

            let merged = Node::merge(left, right);
            queue.push((PriorityKey::for_merge(merged.weight, seq), merged));
        }

        let (_, root) = queue.pop().ok_or(HuffError::EmptyInput)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// A single symbol tree: the root is a leaf and its code is empty.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    /// Longest root to leaf path.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match &node.node_data {
                NodeData::Kids(left, right) => 1 + walk(left).max(walk(right)),
                NodeData::Leaf(_) => 0,
            }
        }
        walk(&self.root)
    }
}

#[cfg(test)]
mod test {
    use super::HuffmanTree;
    use crate::error::HuffError;
    use crate::huffman_coding::node::NodeData;
    use crate::tools::freq_count::FrequencyTable;

    fn leaf_symbol(data: &NodeData) -> u8 {
        match data {
            NodeData::Leaf(s) => s.value(),
            NodeData::Kids(..) => panic!("expected a leaf"),
        }
    }

    #[test]
    fn empty_test() {
        let freqs = FrequencyTable::count(b"").unwrap();
        assert!(matches!(HuffmanTree::build(&freqs), Err(HuffError::EmptyInput)));
    }

    #[test]
    fn single_symbol_test() {
        let freqs = FrequencyTable::from_entries(vec![(b'x', 9)]).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert!(tree.is_degenerate());
        assert_eq!(tree.root().weight, 9);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn left_is_first_extracted_test() {
        let freqs = FrequencyTable::from_entries(vec![(b'b', 2), (b'a', 2)]).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        match &tree.root().node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(leaf_symbol(&left.node_data), b'a');
                assert_eq!(leaf_symbol(&right.node_data), b'b');
            }
            NodeData::Leaf(_) => panic!("expected an internal root"),
        }
    }

    #[test]
    fn classic_weights_test() {
        let freqs = FrequencyTable::from_entries(vec![
            (b'a', 5),
            (b'b', 9),
            (b'c', 12),
            (b'd', 13),
            (b'e', 16),
            (b'f', 45),
        ])
        .unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(tree.root().weight, 100);
        assert_eq!(tree.depth(), 4);
        match &tree.root().node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(leaf_symbol(&left.node_data), b'f');
                assert_eq!(right.weight, 55);
            }
            NodeData::Leaf(_) => panic!("expected an internal root"),
        }
    }
}
