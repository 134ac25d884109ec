//! A static Huffman compressor for 7 bit text.
//!
//! Compression counts every symbol of the input (one `\n` per line, whatever the
//! line ending), builds a Huffman tree with a fixed tie-break, and packs the
//! input with the resulting codes. The result is two artifacts: the frequency
//! table and the packed bits. Decompression needs both.
//!
//! ```
//! use huffify::{compress_bytes, decompress_artifacts, SingleSymbol};
//!
//! let artifacts = compress_bytes(b"ab\nab\n").unwrap();
//! let text = decompress_artifacts(&artifacts, SingleSymbol::Expand).unwrap();
//! assert_eq!(text, b"ab\nab\n");
//! ```
//!
//! Basic usage of the binary:
//!
//! `$> huffify notes.txt` writes notes.txt.freq and notes.txt.huff
//!
//! `$> huffify -d notes.txt` reads them back and writes notes.txt.dec
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::artifacts::CompressedArtifacts;
pub use compression::compress::{compress_bytes, compress_reader};
pub use compression::decompress::{decompress_artifacts, SingleSymbol};
pub use error::{HuffError, Result};
