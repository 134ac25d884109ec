//! BitReader: reads the packed bitstream of a huffify artifact.
//!
//! Reads MSB first from any I/O source that supports the read() call. Running
//! out of data in the middle of a request is an `UnexpectedEof` I/O error.
//!

use std::io;

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads a bit-packed artifact.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
}

impl<R: io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.truncate(0);
                self.cursor = 0;
                return Ok(false);
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
        }
        Ok(true)
    }

    /// Return the next bit, *true* for 1 and *false* for 0.
    pub fn bit(&mut self) -> io::Result<bool> {
        if self.bit_index == 0 && !self.have_data()? {
            return Err(eof());
        }
        let bit = self.buffer[self.cursor] & (0x80 >> self.bit_index) != 0;
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Ok(bit)
    }

    /// Return the next n bits (n <= 64) as an integer, first bit most significant.
    pub fn bint(&mut self, n: usize) -> io::Result<u64> {
        debug_assert!(n <= 64);
        let mut result = 0_u64;
        let mut n = n;
        // Take whole bytes when we are on a byte boundary
        while n > 0 {
            if self.bit_index == 0 && n >= 8 {
                result = result << 8 | self.byte()? as u64;
                n -= 8;
            } else {
                result = result << 1 | self.bit()? as u64;
                n -= 1;
            }
        }
        Ok(result)
    }

    /// Returns the next 8 bits as a byte.
    pub fn byte(&mut self) -> io::Result<u8> {
        if self.bit_index != 0 {
            return Ok(self.bint(8)? as u8);
        }
        if !self.have_data()? {
            return Err(eof());
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    /// Returns n bytes. This is a convenience function, and calls byte n times.
    pub fn bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut result: Vec<u8> = Vec::with_capacity(n.min(BUFFER_SIZE));
        for _ in 0..n {
            result.push(self.byte()?);
        }
        Ok(result)
    }

    /// True when every byte of the source has been consumed. Bits left in a
    /// partially read byte do not count as remaining data.
    pub fn at_end(&mut self) -> io::Result<bool> {
        if self.bit_index != 0 {
            return Ok(self.cursor + 1 >= self.buffer.len() && self.source_empty()?);
        }
        Ok(!self.have_data()?)
    }

    /// Look for one more byte in the source. A byte that turns up is kept at
    /// the end of the buffer so the next read still sees it.
    fn source_empty(&mut self) -> io::Result<bool> {
        let mut next = [0_u8; 1];
        let size = loop {
            match self.source.read(&mut next) {
                Ok(size) => break size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if size == 0 {
            return Ok(true);
        }
        self.buffer.push(next[0]);
        Ok(false)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "Unexpected End Of File")
}
