use log::{debug, trace};

use crate::bitstream::bit_sequence::BitSequence;
use crate::error::{HuffError, Result};
use crate::huffman_coding::node::{Node, NodeData};

/// Walk the tree with the first `bit_count` bits, emitting a byte every time a
/// leaf is reached and starting again from the root.
///
/// Fails with `MalformedPath` when the sequence ends before `bit_count` bits
/// or when the last bits stop short of a leaf. Nothing is returned on failure.
pub fn unpack(bits: &BitSequence, root: &Node, bit_count: u64) -> Result<Vec<u8>> {
    if root.is_leaf() {
        // A lone leaf has an empty code, so no bits can belong to it
        if bit_count > 0 {
            return Err(HuffError::InconsistentRebuild {
                expected: 0,
                actual: bit_count,
            });
        }
        return Ok(Vec::new());
    }

    let mut output = Vec::with_capacity((bit_count.min(1 << 24) / 2) as usize);
    let mut cursor = root;

    for position in 0..bit_count {
        let bit = bits
            .get(position)
            .ok_or(HuffError::MalformedPath { position })?;
        cursor = match &cursor.node_data {
            NodeData::Kids(left, right) => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
            // Cursor is reset to the root on every leaf, and the root has kids
            NodeData::Leaf(_) => unreachable!(),
        };
        if let NodeData::Leaf(symbol) = cursor.node_data {
            output.push(symbol.value());
            cursor = root;
        }
    }

    if !std::ptr::eq(cursor, root) {
        trace!("Stopped inside a path after {} bits.", bit_count);
        return Err(HuffError::MalformedPath {
            position: bit_count,
        });
    }
    debug!("Decoded {} symbols from {} bits.", output.len(), bit_count);
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::unpack;
    use crate::bitstream::bit_sequence::BitSequence;
    use crate::compression::encode::pack;
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::tools::freq_count::FrequencyTable;

    fn setup(data: &[u8]) -> (HuffmanTree, BitSequence, u64) {
        let freqs = FrequencyTable::count(data).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = CodeTable::from_tree(&tree);
        let n = codes.bit_count(&freqs);
        let bits = pack(data, &codes, n).unwrap();
        (tree, bits, n)
    }

    #[test]
    fn lines_scenario_test() {
        let (tree, bits, n) = setup(b"ab\nab\n");
        assert_eq!(unpack(&bits, tree.root(), n).unwrap(), b"ab\nab\n".to_vec());
    }

    #[test]
    fn separator_expands_to_newline_test() {
        let (tree, bits, n) = setup(b"one\r\ntwo");
        assert_eq!(unpack(&bits, tree.root(), n).unwrap(), b"one\ntwo\n".to_vec());
    }

    #[test]
    fn short_sequence_test() {
        let (tree, mut bits, n) = setup(b"ab\nab\n");
        bits.truncate(n - 3);
        assert!(matches!(
            unpack(&bits, tree.root(), n),
            Err(HuffError::MalformedPath { position }) if position == n - 3
        ));
    }

    #[test]
    fn incomplete_last_path_test() {
        // "b" is 0, "a" is 11: stopping after the first bit of 'a' is mid path
        let (tree, bits, _) = setup(b"ab\nab\n");
        assert!(matches!(
            unpack(&bits, tree.root(), 1),
            Err(HuffError::MalformedPath { position: 1 })
        ));
        assert_eq!(unpack(&bits, tree.root(), 2).unwrap(), b"a".to_vec());
    }

    #[test]
    fn single_leaf_test() {
        let (tree, bits, n) = setup(b"\n\n");
        assert_eq!(n, 0);
        assert!(unpack(&bits, tree.root(), 0).unwrap().is_empty());
        assert!(matches!(
            unpack(&bits, tree.root(), 4),
            Err(HuffError::InconsistentRebuild { expected: 0, actual: 4 })
        ));
    }
}
