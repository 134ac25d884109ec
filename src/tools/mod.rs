//! The tools module provides several helper functions for huffify.
//!
//! The tools are:
//! - cli: Command line interface and options.
//! - freq_count: The alphabet and the per-line frequency count.
//! - lines: Line splitting shared by counting and packing.
//! - symbol_map: The presence map used in the frequency descriptor.
//!
pub mod cli;
pub mod freq_count;
pub mod lines;
pub mod symbol_map;
