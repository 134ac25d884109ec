use log::error;

use super::bit_sequence::{byte_len, BitSequence};
use crate::error::Result;
use crate::huffman_coding::code_table::Code;

/// Creates a bitstream for output. Bits are queued MSB first and moved to the
/// output buffer a byte at a time.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
    /// Total bits written, padding excluded.
    written: u64,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified (in bytes).
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
            written: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.written += 1;
        self.write_stream();
    }

    /// Puts every bit of a code on the stream, first step first.
    pub fn out_code(&mut self, code: &Code) {
        code.bits().iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Puts a 16 bit word of pre-packed binary encoded data on the stream.
    pub fn out16(&mut self, data: u16) {
        self.queue <<= 16; //shift queue by bit length
        self.queue |= data as u64; //add data portion to queue
        self.q_bits += 16; //update depth of queue bits
        self.written += 16;
        self.write_stream();
    }

    /// Puts a 32 bit word of pre-packed binary encoded data on the stream.
    pub fn out32(&mut self, data: u32) {
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.written += 32;
        self.write_stream();
    }

    /// Puts a 64 bit word on the stream, high half first.
    pub fn out64(&mut self, data: u64) {
        self.out32((data >> 32) as u32);
        self.out32(data as u32);
    }

    /// Puts a run of whole bytes on the stream.
    pub fn out_bytes(&mut self, data: &[u8]) {
        data.iter().for_each(|&byte| {
            self.queue <<= 8;
            self.queue |= byte as u64;
            self.q_bits += 8;
            self.written += 8;
            self.write_stream();
        });
    }

    /// Number of bits written so far, not counting padding.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Flushes the remaining bits (1-7) from the buffer, padding with 0s in the least
    /// signficant bits
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Flush and hand the packed bits over as a sequence of the written length.
    /// Fails if the output buffer was changed from outside so that its byte
    /// count no longer matches the bits written.
    pub fn into_sequence(mut self) -> Result<BitSequence> {
        self.flush();
        let len = self.written;
        debug_assert_eq!(self.output.len() as u64, byte_len(len));
        BitSequence::from_parts(self.output, len)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}
