//! The compression module manages both directions of huffify.
//!
//! Compression happens in the following steps:
//! - Frequency count: count each symbol of each line, plus one separator per line.
//! - Tree: merge the two lightest nodes until one is left.
//! - Codes: walk the tree, 0 for left and 1 for right.
//! - Packing: re-read the lines and write each symbol's code.
//!
//! The frequency table and the packed bits are written as two artifacts.
//!
//! Decompression rebuilds the tree and codes from the frequency table, recomputes
//! the number of packed bits from them and walks the tree with that many bits.
//!

pub mod artifacts;
pub mod compress;
pub mod decode;
pub mod decompress;
pub mod encode;
