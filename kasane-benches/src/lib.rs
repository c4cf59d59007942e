//! Benchmark support crate for kasane.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks of level construction.

pub mod error;
pub mod params;
pub mod source;
