//! The huffman module turns symbol frequencies into a code tree and a code table.
//!
//! Tree construction is Huffman's algorithm with a fixed tie-break, so the same
//! frequency table always yields the same tree and the same codes. That is what
//! lets decompression rebuild the codes from the persisted frequencies alone.
//!
//! Codes are whatever a preorder walk of the tree gives (left = 0, right = 1).
//! They are not renumbered into canonical form.
//!

pub mod code_table;
pub mod node;
pub mod tree;
