use std::io::Read;

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{HuffError, Result};
use crate::tools::lines::Lines;

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 128;

/// Inputs larger than this are counted in parallel.
const PARALLEL_THRESHOLD: usize = 64_000;

/// One value of the 128 symbol alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// The synthetic symbol counted once after every line.
    pub const LINE_SEPARATOR: Symbol = Symbol(b'\n');

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Symbol {
    type Error = u8;

    /// Fails with the rejected byte when it is outside the alphabet.
    fn try_from(byte: u8) -> std::result::Result<Self, Self::Error> {
        if (byte as usize) < ALPHABET_SIZE {
            Ok(Symbol(byte))
        } else {
            Err(byte)
        }
    }
}

/// A symbol and how often it was seen. Count is always > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub count: u64,
}

/// Symbol counts over the whole alphabet. Only the non-zero counts are
/// meaningful; they are what gets persisted and what the tree is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count every byte of every line, plus one line separator per line.
    pub fn count(data: &[u8]) -> Result<Self> {
        let lines: Vec<(usize, &[u8])> = Lines::new(data).collect();

        let mut counts = if data.len() > PARALLEL_THRESHOLD {
            debug!("Counting {} lines in parallel.", lines.len());
            lines
                .par_iter()
                .try_fold(
                    || [0_u64; ALPHABET_SIZE],
                    |mut freqs, &(offset, line)| -> Result<[u64; ALPHABET_SIZE]> {
                        count_line(&mut freqs, offset, line)?;
                        Ok(freqs)
                    },
                )
                .try_reduce(
                    || [0_u64; ALPHABET_SIZE],
                    |mut s, f| {
                        s.iter_mut().zip(f.iter()).for_each(|(a, b)| *a += b);
                        Ok(s)
                    },
                )?
        } else {
            let mut freqs = [0_u64; ALPHABET_SIZE];
            for &(offset, line) in &lines {
                count_line(&mut freqs, offset, line)?;
            }
            freqs
        };

        counts[Symbol::LINE_SEPARATOR.value() as usize] += lines.len() as u64;
        trace!("Counted {} lines in {} bytes.", lines.len(), data.len());
        Ok(Self { counts })
    }

    /// Read the whole source, then count it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::count(&data)
    }

    /// Build a table from (symbol, count) pairs, as read back from a descriptor.
    /// Symbols must be in the alphabet, counts non-zero, and no symbol repeated.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0_u64; ALPHABET_SIZE];
        for (offset, (byte, count)) in entries.into_iter().enumerate() {
            let symbol =
                Symbol::try_from(byte).map_err(|byte| HuffError::AlphabetViolation { byte, offset })?;
            if count == 0 {
                return Err(HuffError::invalid_artifact(format!(
                    "symbol {:#04x} has a zero count",
                    byte
                )));
            }
            if counts[symbol.value() as usize] != 0 {
                return Err(HuffError::invalid_artifact(format!(
                    "symbol {:#04x} is listed twice",
                    byte
                )));
            }
            counts[symbol.value() as usize] = count;
        }
        Ok(Self { counts })
    }

    /// Count for one symbol (0 when unseen).
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.value() as usize]
    }

    /// The non-zero entries in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = FrequencyEntry> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(i, &count)| FrequencyEntry {
                symbol: Symbol(i as u8),
                count,
            })
    }

    /// Number of distinct symbols seen.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of symbols counted, separators included.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0, |a, &c| a.saturating_add(c))
    }
}

fn count_line(freqs: &mut [u64; ALPHABET_SIZE], offset: usize, line: &[u8]) -> Result<()> {
    for (i, &byte) in line.iter().enumerate() {
        let symbol = Symbol::try_from(byte).map_err(|byte| HuffError::AlphabetViolation {
            byte,
            offset: offset + i,
        })?;
        freqs[symbol.value() as usize] += 1;
    }
    Ok(())
}
