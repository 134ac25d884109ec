//! The two artifacts a compression produces, and how they are laid out.
//!
//! Frequency descriptor:
//! - signature `HFQ1`
//! - 16 bit presence index and one 16 bit presence map per marked block
//!   (see [`crate::tools::symbol_map`])
//! - a 64 bit count for every present symbol, ascending
//!
//! Bit payload:
//! - signature `HFB1`
//! - 64 bit length of the packed bits
//! - the packed bits, zero padded to a whole byte
//!
//! All integers are big endian.

use std::io::{Read, Write};

use log::{debug, info};

use crate::bitstream::bit_sequence::{byte_len, BitSequence};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FrequencyTable;
use crate::tools::symbol_map::{decode_sym_map, encode_sym_map, index_in_alphabet};

pub const DESCRIPTOR_SIGNATURE: [u8; 4] = *b"HFQ1";
pub const PAYLOAD_SIGNATURE: [u8; 4] = *b"HFB1";

/// The frequency descriptor and the bit payload of one compression. Neither
/// half can be decoded without the other, so they always travel together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedArtifacts {
    pub frequencies: FrequencyTable,
    pub payload: BitSequence,
}

impl CompressedArtifacts {
    /// Write the descriptor and the payload to their own streams.
    pub fn write_to<D: Write, P: Write>(&self, descriptor: D, payload: P) -> Result<()> {
        write_descriptor(&self.frequencies, descriptor)?;
        write_payload(&self.payload, payload)?;
        Ok(())
    }

    /// Read both halves back. Fails if either one is malformed.
    pub fn read_from<D: Read, P: Read>(descriptor: D, payload: P) -> Result<Self> {
        let frequencies = read_descriptor(descriptor)?;
        let payload = read_payload(payload)?;
        Ok(Self {
            frequencies,
            payload,
        })
    }
}

/// Serialize a frequency table.
pub fn write_descriptor<W: Write>(freqs: &FrequencyTable, mut writer: W) -> Result<()> {
    let symbols: Vec<u8> = freqs.entries().map(|e| e.symbol.value()).collect();
    let map = encode_sym_map(&symbols);

    let mut bp = BitPacker::new(4 + map.len() * 2 + symbols.len() * 8);
    bp.out_bytes(&DESCRIPTOR_SIGNATURE);
    map.iter().for_each(|&m| bp.out16(m));
    freqs.entries().for_each(|e| bp.out64(e.count));
    bp.flush();

    writer.write_all(&bp.output)?;
    debug!(
        "Wrote frequency descriptor: {} symbols in {} bytes.",
        symbols.len(),
        bp.output.len()
    );
    Ok(())
}

/// Deserialize a frequency table, rejecting anything that does not match the layout.
pub fn read_descriptor<R: Read>(reader: R) -> Result<FrequencyTable> {
    let mut br = BitReader::new(reader);
    if br.bytes(4)? != DESCRIPTOR_SIGNATURE {
        return Err(HuffError::invalid_artifact("missing frequency descriptor signature"));
    }

    let index = br.bint(16)? as u16;
    if !index_in_alphabet(index) {
        return Err(HuffError::invalid_artifact(format!(
            "presence index {:#06x} marks symbols outside the alphabet",
            index
        )));
    }
    let mut map = vec![index];
    for _ in 0..index.count_ones() {
        map.push(br.bint(16)? as u16);
    }
    let symbols = decode_sym_map(&map);

    let mut entries = Vec::with_capacity(symbols.len());
    for sym in symbols {
        entries.push((sym, br.bint(64)?));
    }
    if !br.at_end()? {
        return Err(HuffError::invalid_artifact("trailing data after frequency descriptor"));
    }

    let freqs = FrequencyTable::from_entries(entries)?;
    info!("Read frequency descriptor with {} symbols.", freqs.len());
    Ok(freqs)
}

/// Serialize a bit sequence with its length.
pub fn write_payload<W: Write>(bits: &BitSequence, mut writer: W) -> Result<()> {
    let mut bp = BitPacker::new(12);
    bp.out_bytes(&PAYLOAD_SIGNATURE);
    bp.out64(bits.len());
    writer.write_all(&bp.output)?;
    writer.write_all(bits.as_bytes())?;
    debug!("Wrote bit payload: {} bits.", bits.len());
    Ok(())
}

/// Deserialize a bit sequence. The byte count must match the recorded length.
pub fn read_payload<R: Read>(reader: R) -> Result<BitSequence> {
    let mut br = BitReader::new(reader);
    if br.bytes(4)? != PAYLOAD_SIGNATURE {
        return Err(HuffError::invalid_artifact("missing bit payload signature"));
    }
    let len = br.bint(64)?;
    let needed = byte_len(len);

    let mut bytes = Vec::new();
    while !br.at_end()? {
        bytes.push(br.byte()?);
        if bytes.len() as u64 > needed {
            break;
        }
    }
    let bits = BitSequence::from_parts(bytes, len)?;
    info!("Read bit payload of {} bits.", bits.len());
    Ok(bits)
}
