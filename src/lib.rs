//! Polar CORDIC - Fixed-point vectoring engine for rectangular-to-polar conversion
//!
//! This crate is a bit-exact software twin of an RTL CORDIC block: it takes a
//! Cartesian pair (x, y) = (r·cos φ, r·sin φ) as signed fixed-point codes and
//! recovers phase and magnitude using only shifts, adds and a precomputed
//! arctangent table. Every intermediate is integer arithmetic, so a given
//! input always yields the same output codes the hardware would produce.

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod table;

// Re-export core types for convenience
pub use config::{CordicConfig, PhaseNorm};
pub use engine::{rotate, Polar};
pub use error::CordicError;
pub use table::AngleTable;
