use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::artifacts::CompressedArtifacts;
use super::encode::pack;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::FrequencyTable;

/// Extension of the frequency descriptor written next to the input.
pub const DESCRIPTOR_EXT: &str = "freq";
/// Extension of the bit payload written next to the input.
pub const PAYLOAD_EXT: &str = "huff";

/// Count, build the tree, derive the codes and pack the data.
pub fn compress_bytes(data: &[u8]) -> Result<CompressedArtifacts> {
    let frequencies = FrequencyTable::count(data)?;
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    if tree.is_degenerate() {
        info!("Only one distinct symbol, its code is empty.");
    }

    let bit_count = codes.bit_count(&frequencies);
    debug!(
        "{} symbols, {} distinct, tree depth {}, {} bits.",
        frequencies.total(),
        frequencies.len(),
        tree.depth(),
        bit_count
    );

    let payload = pack(data, &codes, bit_count)?;
    Ok(CompressedArtifacts {
        frequencies,
        payload,
    })
}

/// Read the whole stream, then compress it.
pub fn compress_reader<R: Read>(mut reader: R) -> Result<CompressedArtifacts> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    compress_bytes(&data)
}

/// Compress every file named in opts, writing FILE.freq and FILE.huff beside it.
pub fn compress(opts: &HuffOpts) -> Result<()> {
    for fname in &opts.files {
        info!("Compressing {}.", fname);
        let input = Path::new(fname);
        let artifacts = compress_reader(File::open(input)?)?;

        let descriptor = open_output(&with_ext(input, DESCRIPTOR_EXT), opts.force_overwrite)?;
        let payload = open_output(&with_ext(input, PAYLOAD_EXT), opts.force_overwrite)?;
        let (mut descriptor, mut payload) = (BufWriter::new(descriptor), BufWriter::new(payload));
        artifacts.write_to(&mut descriptor, &mut payload)?;
        descriptor.flush()?;
        payload.flush()?;

        let original = fs::metadata(input)?.len();
        info!(
            "Wrote {}.{} and {}.{}: {} bytes packed into {} bits.",
            fname,
            DESCRIPTOR_EXT,
            fname,
            PAYLOAD_EXT,
            original,
            artifacts.payload.len()
        );
    }
    Ok(())
}

/// FILE -> FILE.ext
pub(crate) fn with_ext(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Create an output file. An existing file is only replaced when forced.
pub(crate) fn open_output(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    Ok(options.open(path)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::HuffError;

    #[test]
    fn bit_count_identity_test() {
        let artifacts = compress_bytes(b"she sells sea shells\nby the sea shore\n").unwrap();
        let tree = HuffmanTree::build(&artifacts.frequencies).unwrap();
        let codes = CodeTable::from_tree(&tree);
        assert_eq!(artifacts.payload.len(), codes.bit_count(&artifacts.frequencies));
    }

    #[test]
    fn empty_input_test() {
        assert!(matches!(compress_bytes(b""), Err(HuffError::EmptyInput)));
    }

    #[test]
    fn single_symbol_test() {
        let artifacts = compress_bytes(b"\n\n\n\n").unwrap();
        assert_eq!(artifacts.frequencies.len(), 1);
        assert!(artifacts.payload.is_empty());
    }

    #[test]
    fn with_ext_test() {
        assert_eq!(with_ext(Path::new("dir/a.txt"), "huff"), PathBuf::from("dir/a.txt.huff"));
    }
}
