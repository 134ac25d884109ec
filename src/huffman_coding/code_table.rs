use std::fmt;

use log::debug;
use rustc_hash::FxHashMap;

use super::node::{Node, NodeData};
use super::tree::HuffmanTree;
use crate::tools::freq_count::{FrequencyTable, Symbol};

/// Path from the root to a leaf. `false` is a step left, `true` a step right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this code with one more step appended.
    pub fn extended(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<&str> for Code {
    /// Parse a code written as '0' and '1' characters. Other characters are ignored.
    fn from(s: &str) -> Self {
        let bits = s
            .chars()
            .filter_map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect();
        Self { bits }
    }
}

/// Symbol to code map. Built once from a tree and never changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: FxHashMap<Symbol, Code>,
}

impl CodeTable {
    /// Walk the tree in preorder, left before right, recording the path to every leaf.
    /// A tree that is a single leaf gives that symbol the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = FxHashMap::default();
        assign_codes(tree.root(), Code::new(), &mut codes);
        debug!("Generated {} codes.", codes.len());
        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> {
        let mut sorted: Vec<(Symbol, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        sorted.sort_unstable_by_key(|&(s, _)| s);
        sorted.into_iter()
    }

    /// Number of bits needed to pack the counted input: the sum of count times
    /// code length. Symbols without a code contribute nothing.
    pub fn bit_count(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .entries()
            .map(|e| e.count.saturating_mul(self.get(e.symbol).map_or(0, |c| c.len() as u64)))
            .fold(0, u64::saturating_add)
    }
}

fn assign_codes(node: &Node, path: Code, codes: &mut FxHashMap<Symbol, Code>) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            assign_codes(left, path.extended(false), codes);
            assign_codes(right, path.extended(true), codes);
        }
        NodeData::Leaf(symbol) => {
            codes.insert(*symbol, path);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::tools::freq_count::{FrequencyTable, Symbol};

    fn sym(b: u8) -> Symbol {
        Symbol::try_from(b).unwrap()
    }

    fn table_for(entries: Vec<(u8, u64)>) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_entries(entries).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = CodeTable::from_tree(&tree);
        (freqs, codes)
    }

    #[test]
    fn classic_weights_test() {
        let (freqs, codes) = table_for(vec![
            (b'a', 5),
            (b'b', 9),
            (b'c', 12),
            (b'd', 13),
            (b'e', 16),
            (b'f', 45),
        ]);
        assert_eq!(codes.get(sym(b'f')), Some(&Code::from("0")));
        assert_eq!(codes.get(sym(b'c')), Some(&Code::from("100")));
        assert_eq!(codes.get(sym(b'd')), Some(&Code::from("101")));
        assert_eq!(codes.get(sym(b'a')), Some(&Code::from("1100")));
        assert_eq!(codes.get(sym(b'b')), Some(&Code::from("1101")));
        assert_eq!(codes.get(sym(b'e')), Some(&Code::from("111")));
        assert_eq!(codes.bit_count(&freqs), 224);

        // Heavier symbols never get longer codes
        let mut by_weight: Vec<(u64, usize)> = freqs
            .entries()
            .map(|e| (e.count, codes.get(e.symbol).unwrap().len()))
            .collect();
        by_weight.sort_unstable();
        assert!(by_weight.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn lines_scenario_test() {
        let freqs = FrequencyTable::count(b"ab\nab\n").unwrap();
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        // '\n' and 'a' merge first, 'b' then sits left of that merge
        assert_eq!(codes.get(sym(b'b')).unwrap().to_string(), "0");
        assert_eq!(codes.get(sym(b'\n')).unwrap().to_string(), "10");
        assert_eq!(codes.get(sym(b'a')).unwrap().to_string(), "11");
        assert_eq!(codes.bit_count(&freqs), 10);
    }

    #[test]
    fn prefix_free_test() {
        let (_, codes) = table_for((0..128).map(|s| (s as u8, 1 + (s as u64 * 7) % 13)).collect());
        let all: Vec<&Code> = codes.iter().map(|(_, c)| c).collect();
        assert_eq!(all.len(), 128);
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn deterministic_test() {
        let entries = vec![(b'x', 3), (b'y', 3), (b'z', 3), (b'#', 6), (b'w', 1)];
        let (_, first) = table_for(entries.clone());
        for _ in 0..10 {
            let (_, again) = table_for(entries.clone());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn single_symbol_gets_empty_code_test() {
        let (freqs, codes) = table_for(vec![(b'q', 12)]);
        assert_eq!(codes.len(), 1);
        assert!(codes.get(sym(b'q')).unwrap().is_empty());
        assert_eq!(codes.bit_count(&freqs), 0);
    }

    #[test]
    fn extended_leaves_original_test() {
        let root = Code::new();
        let left = root.extended(false);
        let right = left.extended(true);
        assert!(root.is_empty());
        assert_eq!(left.to_string(), "0");
        assert_eq!(right.to_string(), "01");
        assert!(left.is_prefix_of(&right));
    }
}
