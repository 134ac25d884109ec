use crate::error::{HuffError, Result};

/// An ordered run of bits, stored MSB first. The length lives beside the
/// bytes, never inside them, so the last byte may carry zero padding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: u64,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble a sequence from packed bytes and its bit length. The byte
    /// count must be exactly what the length needs.
    pub fn from_parts(bytes: Vec<u8>, len: u64) -> Result<Self> {
        let needed = byte_len(len);
        if bytes.len() as u64 != needed {
            return Err(HuffError::invalid_artifact(format!(
                "{} bits need {} bytes, found {}",
                len,
                needed,
                bytes.len()
            )));
        }
        Ok(Self { bytes, len })
    }

    /// Bit at `index`, or None past the end.
    pub fn get(&self, index: u64) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let byte = self.bytes[(index / 8) as usize];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Keep only the first `len` bits. Does nothing if the sequence is shorter.
    pub fn truncate(&mut self, len: u64) {
        if len >= self.len {
            return;
        }
        self.len = len;
        self.bytes.truncate(byte_len(len) as usize);
        if len % 8 != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xff << (8 - len % 8);
            }
        }
    }
}

/// Bytes needed to hold `bits` bits.
pub fn byte_len(bits: u64) -> u64 {
    bits / 8 + (bits % 8 != 0) as u64
}
