//! The bitstream module forms the I/O subsystem of huffify.
//!
//! - bit_sequence: an ordered run of bits with its length kept beside the bytes.
//! - bitpacker: queues bits MSB first and turns them into bytes, for the payload and the descriptor.
//! - bitreader: reads bits and big endian integers back from any `Read` source.
//!
//! Nothing here knows about codes or trees beyond writing a `Code`'s bits in order.
//!
pub mod bit_sequence;
pub mod bitpacker;
pub mod bitreader;
