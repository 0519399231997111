//! CORDIC vectoring
//!
//! Recovers phase and magnitude from a Cartesian sample using only adds,
//! arithmetic shifts and one table lookup per step. This is the software
//! twin of the RTL datapath: the same truncating shifts in the same order,
//! so the recovered phase matches the hardware bit for bit.
//!
//! ## Algorithm
//!
//! Vectoring mode steers the input toward the positive x axis. At step j
//! the vector turns by ±arctan(2^-j), clockwise when y is still positive,
//! counterclockwise when it has undershot; the signed steps accumulate
//! into the recovered phase. Inputs in the left half-plane sit outside the
//! ±π/2 convergence wedge, so they are first flipped through the origin
//! and the accumulator is seeded with ±π, signed to keep the result in
//! [-π, π).
//!
//! Every un-normalized micro-rotation stretches the vector by
//! sqrt(1 + 2^-2j). After the loop x carries r scaled by the accumulated
//! gain, which one fixed-point multiply with the table's gain constant
//! undoes.

use crate::codec;
use crate::error::CordicError;
use crate::table::AngleTable;

/// Recovered polar coordinates as fixed-point codes.
///
/// `phi` is exact against the reference datapath; `r` carries the
/// truncation drift of the shift-add loop, so it may exceed the nominal
/// full-scale code by a few steps for inputs on the unit circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polar {
    pub phi: i64,
    pub r: i64,
}

/// Working registers for one conversion. Lives on the stack for the
/// duration of a single `rotate` call; the engine keeps no state between
/// calls.
#[derive(Debug, Clone, Copy)]
struct VectorState {
    x: i64,
    y: i64,
    phi: i64,
}

/// Convert `(x0, y0)` = (r·cos φ, r·sin φ) to phase and magnitude.
///
/// # Arguments
/// * `x0`, `y0` - Input codes, must lie in the `bits`-wide range
/// * `table` - Angle table built for the same width
/// * `bits` - Data-path width the caller believes it is using
///
/// The width is cross-checked against the table so a caller holding the
/// wrong table fails loudly instead of producing plausible garbage.
/// `(0, 0)` has no meaningful phase and maps to `(0, 0)` by convention.
pub fn rotate(x0: i64, y0: i64, table: &AngleTable, bits: u32) -> Result<Polar, CordicError> {
    let config = table.config();
    if bits != config.bits() {
        return Err(CordicError::config(format!(
            "table built for {}-bit data path, rotate called with {}",
            config.bits(),
            bits
        )));
    }
    codec::check_range(x0, bits)?;
    codec::check_range(y0, bits)?;

    if x0 == 0 && y0 == 0 {
        return Ok(Polar { phi: 0, r: 0 });
    }

    // Left half-plane: flip through the origin and account for the ±π
    // turn. The seed sign follows y so the boundary at exactly ±π is
    // reported as -π.
    let mut state = if x0 < 0 {
        VectorState {
            x: codec::saturating_neg(x0, bits),
            y: codec::saturating_neg(y0, bits),
            phi: if y0 > 0 {
                table.pi_seed()
            } else {
                -table.pi_seed()
            },
        }
    } else {
        VectorState {
            x: x0,
            y: y0,
            phi: 0,
        }
    };

    let extended = config.extended_bits();
    for (j, &gamma) in table.entries().iter().enumerate() {
        let d: i64 = if state.y >= 0 { 1 } else { -1 };
        let (x, y) = (state.x, state.y);
        state.x = x + d * (y >> j);
        state.y = y - d * (x >> j);
        state.phi += d * gamma;
        check_extended(&state, extended, j)?;
    }

    // x now holds r stretched by the accumulated gain; one multiply by
    // the integer gain constant and a truncating shift undo it
    let r = (state.x * table.gain_fix()) >> (bits - 1);

    Ok(Polar { phi: state.phi, r })
}

/// The guard margin is sized for inputs within the unit disc; anything
/// that escapes it mid-loop is a configuration problem, reported with the
/// iteration that tripped.
#[inline]
fn check_extended(state: &VectorState, extended: u32, iteration: usize) -> Result<(), CordicError> {
    let (min, max) = codec::range_of(extended);
    for value in [state.x, state.y, state.phi] {
        if value < min || value > max {
            return Err(CordicError::config(format!(
                "working state {} outside {}-bit range at iteration {}",
                value, extended, iteration
            )));
        }
    }
    Ok(())
}
