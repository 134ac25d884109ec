use log::{debug, warn};

use crate::bitstream::bit_sequence::{byte_len, BitSequence};
use crate::bitstream::bitpacker::BitPacker;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::tools::freq_count::Symbol;
use crate::tools::lines::Lines;

/// Translate the input into bits using the code table. The input is read line
/// by line exactly as it was counted, with the separator's code after every line.
///
/// `bit_count` is the length the caller computed from the frequency table. It
/// sizes the output buffer; if the input no longer matches the counts the
/// result is longer or shorter than that, which is only logged.
pub fn pack(data: &[u8], codes: &CodeTable, bit_count: u64) -> Result<BitSequence> {
    let mut bp = BitPacker::new(byte_len(bit_count) as usize);
    let separator = codes.get(Symbol::LINE_SEPARATOR);

    for (offset, line) in Lines::new(data) {
        for (i, &byte) in line.iter().enumerate() {
            let symbol = Symbol::try_from(byte).map_err(|byte| HuffError::AlphabetViolation {
                byte,
                offset: offset + i,
            })?;
            let code = codes
                .get(symbol)
                .ok_or(HuffError::MissingCode { symbol: byte })?;
            bp.out_code(code);
        }
        if let Some(code) = separator {
            bp.out_code(code);
        }
    }

    if bp.bits_written() != bit_count {
        warn!(
            "Packed {} bits but the frequency table implies {}.",
            bp.bits_written(),
            bit_count
        );
    }
    debug!("Packed {} bits at {}.", bp.bits_written(), bp.loc());
    bp.into_sequence()
}
