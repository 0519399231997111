//! Engine configuration
//!
//! A deployment fixes its data-path width, iteration count and phase
//! convention once; everything downstream (table, seed constant, guard
//! margin) is derived from this struct. Impossible combinations are
//! rejected at construction so the hot path never revalidates.

use crate::error::CordicError;

/// Phase output convention.
///
/// `Pi` reports phase normalized by π, so the code domain [-1.0, 1.0)
/// represents [-π, π) and the half-plane seed is the full-scale code
/// itself. `Radians` reports raw radians, matching the RTL coefficient
/// set; the seed then overflows the data-path width and costs two extra
/// guard bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseNorm {
    Pi,
    Radians,
}

impl PhaseNorm {
    /// Guard bits the accumulators need beyond the data-path width.
    #[inline]
    pub fn guard_bits(&self) -> u32 {
        match self {
            // Seed is ±full-scale, one overshoot bit covers the loop
            PhaseNorm::Pi => 1,
            // Seed is ±π at the data-path scale, two integer bits wide,
            // plus one overshoot bit
            PhaseNorm::Radians => 3,
        }
    }

    /// Divisor applied to angles before encoding.
    #[inline]
    pub(crate) fn divisor(&self) -> f64 {
        match self {
            PhaseNorm::Pi => std::f64::consts::PI,
            PhaseNorm::Radians => 1.0,
        }
    }
}

/// Immutable per-deployment parameters for the vectoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CordicConfig {
    bits: u32,
    iterations: usize,
    norm: PhaseNorm,
}

impl CordicConfig {
    /// Narrowest usable data path. At 4 bits the π-normalized table
    /// truncates its first two angles to the same code and the
    /// decreasing-angle invariant is unsatisfiable.
    pub const MIN_BITS: u32 = 5;

    /// Widest data path that keeps every intermediate (including the
    /// radians seed at +3 guard bits and the gain product) inside i64.
    pub const MAX_BITS: u32 = 30;

    /// Iterations beyond this cannot move the phase accumulator at any
    /// permitted width; every further table entry truncates to zero.
    pub const MAX_ITERATIONS: usize = 48;

    /// Create a validated configuration.
    ///
    /// # Arguments
    /// * `bits` - Data-path width, `MIN_BITS..=MAX_BITS`
    /// * `iterations` - Micro-rotation count, `1..=MAX_ITERATIONS`
    /// * `norm` - Phase output convention
    pub fn new(bits: u32, iterations: usize, norm: PhaseNorm) -> Result<Self, CordicError> {
        if bits < Self::MIN_BITS || bits > Self::MAX_BITS {
            return Err(CordicError::config(format!(
                "width {} outside supported range [{}, {}]",
                bits,
                Self::MIN_BITS,
                Self::MAX_BITS
            )));
        }
        if iterations == 0 || iterations > Self::MAX_ITERATIONS {
            return Err(CordicError::config(format!(
                "iteration count {} outside supported range [1, {}]",
                iterations,
                Self::MAX_ITERATIONS
            )));
        }
        Ok(Self {
            bits,
            iterations,
            norm,
        })
    }

    /// Data-path width in bits.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of micro-rotations per conversion.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Phase output convention.
    #[inline]
    pub fn norm(&self) -> PhaseNorm {
        self.norm
    }

    /// Guard bits carried by the working registers.
    #[inline]
    pub fn guard_bits(&self) -> u32 {
        self.norm.guard_bits()
    }

    /// Width of the working registers inside the rotation loop.
    #[inline]
    pub fn extended_bits(&self) -> u32 {
        self.bits + self.guard_bits()
    }
}
