use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, error, info, warn};

use super::artifacts::CompressedArtifacts;
use super::compress::{open_output, with_ext, DESCRIPTOR_EXT, PAYLOAD_EXT};
use super::decode::unpack;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::node::NodeData;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::cli::{HuffOpts, Output};

/// Extension of the decompressed output.
pub const OUTPUT_EXT: &str = "dec";

/// Largest output a single symbol descriptor may expand to (4 GiB).
pub const MAX_EXPANDED_LEN: u64 = 1 << 32;

/// What decompression gives back when the input had one distinct symbol.
/// That symbol's code is empty and the payload has no bits either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleSymbol {
    /// Repeat the symbol as many times as the descriptor counted it
    Expand,
    /// Produce no output
    Empty,
}

/// Rebuild the tree and codes from the descriptor, recompute the bit count and
/// decode the payload with it.
pub fn decompress_artifacts(artifacts: &CompressedArtifacts, single: SingleSymbol) -> Result<Vec<u8>> {
    let tree = HuffmanTree::build(&artifacts.frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let bit_count = codes.bit_count(&artifacts.frequencies);
    debug!(
        "Descriptor implies {} bits, payload holds {}.",
        bit_count,
        artifacts.payload.len()
    );

    // A short payload is caught by the decoder as a malformed path
    if artifacts.payload.len() > bit_count {
        error!("Payload is longer than its frequency descriptor allows.");
        return Err(HuffError::InconsistentRebuild {
            expected: bit_count,
            actual: artifacts.payload.len(),
        });
    }

    if let NodeData::Leaf(symbol) = tree.root().node_data {
        let count = tree.root().weight;
        return Ok(match single {
            SingleSymbol::Expand => {
                info!("Single symbol input, repeating {:?} {} times.", symbol.value() as char, count);
                expand(symbol.value(), count)?
            }
            SingleSymbol::Empty => {
                warn!("Single symbol input has an empty code, nothing to decode.");
                Vec::new()
            }
        });
    }

    unpack(&artifacts.payload, tree.root(), bit_count)
}

/// Repeat `byte` `count` times. The count comes from the descriptor, so it is
/// bounded before anything is allocated.
fn expand(byte: u8, count: u64) -> Result<Vec<u8>> {
    let len = usize::try_from(count)
        .ok()
        .filter(|_| count <= MAX_EXPANDED_LEN)
        .ok_or_else(|| {
            HuffError::invalid_artifact(format!(
                "single symbol count {} exceeds the {} byte limit",
                count, MAX_EXPANDED_LEN
            ))
        })?;
    let mut output = Vec::new();
    output.try_reserve_exact(len).map_err(|e| {
        HuffError::invalid_artifact(format!("cannot allocate {} bytes of output: {}", len, e))
    })?;
    output.resize(len, byte);
    Ok(output)
}

/// Decompress FILE.freq and FILE.huff for every file named in opts, writing
/// FILE.dec or to stdout.
pub fn decompress(opts: &HuffOpts) -> Result<()> {
    for fname in &opts.files {
        info!("Decompressing {}.", fname);
        let base = Path::new(fname);
        let descriptor = BufReader::new(File::open(with_ext(base, DESCRIPTOR_EXT))?);
        let payload = BufReader::new(File::open(with_ext(base, PAYLOAD_EXT))?);
        let artifacts = CompressedArtifacts::read_from(descriptor, payload)?;

        let data = decompress_artifacts(&artifacts, opts.single_symbol)?;

        match opts.output {
            Output::File => {
                let out_path = with_ext(base, OUTPUT_EXT);
                let mut f_out = BufWriter::new(open_output(&out_path, opts.force_overwrite)?);
                f_out.write_all(&data)?;
                f_out.flush()?;
                info!("Wrote {} bytes to {}.", data.len(), out_path.display());
            }
            Output::Stdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                lock.write_all(&data)?;
                lock.flush()?;
            }
        }
    }
    Ok(())
}
