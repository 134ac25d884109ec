//! Error type shared by every stage of huffify.
//!
//! All variants abort the current compression or decompression call. None of
//! them are transient, so nothing here is retried.

use thiserror::Error;

/// Main error type for huffify.
#[derive(Error, Debug)]
pub enum HuffError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A byte outside the 128 symbol alphabet was found in the input.
    #[error("Byte {byte:#04x} at offset {offset} is outside the 128 symbol alphabet")]
    AlphabetViolation {
        /// The offending byte
        byte: u8,
        /// Offset of the byte in the input
        offset: usize,
    },

    /// No symbols were observed, so there is nothing to build a tree from.
    #[error("No symbols observed, cannot build a code tree")]
    EmptyInput,

    /// The frequency descriptor and the bit payload disagree on the bit count.
    #[error("Frequency descriptor implies {expected} bits, payload holds {actual}")]
    InconsistentRebuild {
        /// Bit count recomputed from the frequency descriptor
        expected: u64,
        /// Bit count found in the payload
        actual: u64,
    },

    /// The bit count ran out while the decoder was inside an unfinished path.
    #[error("Bits exhausted at bit {position} with an incomplete symbol path")]
    MalformedPath {
        /// Bit index at which decoding stopped
        position: u64,
    },

    /// A symbol in the alphabet has no code in the current table.
    #[error("Symbol {symbol:#04x} has no code in the code table")]
    MissingCode {
        /// The symbol without a code
        symbol: u8,
    },

    /// An artifact has a bad signature, layout, or trailing data.
    #[error("Invalid artifact: {message}")]
    InvalidArtifact {
        /// What was wrong with the artifact
        message: String,
    },
}

impl HuffError {
    /// Create an invalid artifact error
    pub fn invalid_artifact<S: Into<String>>(message: S) -> Self {
        Self::InvalidArtifact {
            message: message.into(),
        }
    }
}

/// Result type alias for huffify operations
pub type Result<T> = std::result::Result<T, HuffError>;
