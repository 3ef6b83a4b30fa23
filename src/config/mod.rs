//! JSON configuration loaders for the demo binaries.

pub mod segment;
