//! Integration tests for kelvin-rs crates.
//!
//! End-to-end runs across the loader, the spectral core, the color pipeline
//! and the CSV writer.
