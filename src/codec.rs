//! Fixed-point codec
//!
//! Signed fixed-point with a symmetric scale: width `n` maps the real
//! interval [-1.0, 1.0] onto codes scaled by 2^(n-1) - 1, truncating toward
//! zero. The extreme negative code -2^(n-1) decodes to slightly less than
//! -1.0 because of two's-complement asymmetry; it is never produced by
//! encoding but is accepted everywhere codes are consumed.
//!
//! All arithmetic is on i64 so the same codec serves both the data-path
//! width and the guard-extended widths used inside the rotation loop.

use crate::error::CordicError;

/// Widest width any caller may ask for. Keeps every bound exactly
/// representable in f64 during encode checks.
const MAX_WIDTH: u32 = 48;

#[inline]
fn assert_width(bits: u32) {
    assert!(
        (2..=MAX_WIDTH).contains(&bits),
        "Width {} outside supported range [2, {}]",
        bits,
        MAX_WIDTH
    );
}

/// Scale factor for a `bits`-wide code: 2^(bits-1) - 1.
///
/// # Panics
/// Panics if `bits` is outside the supported width range 2..=48
#[inline]
pub fn scale_of(bits: u32) -> i64 {
    assert_width(bits);
    (1i64 << (bits - 1)) - 1
}

/// Representable range of a `bits`-wide code: [-2^(bits-1), 2^(bits-1) - 1].
///
/// # Panics
/// Panics if `bits` is outside 2..=48
#[inline]
pub fn range_of(bits: u32) -> (i64, i64) {
    assert_width(bits);
    (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
}

/// Check that `value` is representable in `bits` bits.
///
/// # Panics
/// Panics if `bits` is outside 2..=48; out-of-range values are reported
/// through the `Result`, never by panicking
#[inline]
pub fn check_range(value: i64, bits: u32) -> Result<(), CordicError> {
    let (min, max) = range_of(bits);
    if value < min || value > max {
        return Err(CordicError::range(value, bits));
    }
    Ok(())
}

/// Encode a real value as a `bits`-wide fixed-point code.
///
/// Truncates toward zero, so ±1.0 encode exactly to ±(2^(bits-1) - 1).
/// Values outside the representable range (and non-finite values) are
/// rejected, never clamped or wrapped.
///
/// # Panics
/// Panics if `bits` is outside 2..=48
pub fn to_fixed(value: f64, bits: u32) -> Result<i64, CordicError> {
    let scaled = (value * scale_of(bits) as f64).trunc();
    let (min, max) = range_of(bits);
    // NaN fails both comparisons and takes the error path
    if scaled >= min as f64 && scaled <= max as f64 {
        Ok(scaled as i64)
    } else {
        Err(CordicError::range(scaled as i64, bits))
    }
}

/// Decode a `bits`-wide fixed-point code to a real value.
///
/// No range requirement on `value`: guard-extended intermediates may be
/// decoded for diagnostics.
///
/// # Panics
/// Panics if `bits` is outside 2..=48
#[inline]
pub fn to_real(value: i64, bits: u32) -> f64 {
    value as f64 / scale_of(bits) as f64
}

/// Reinterpret the low `bits` bits of a raw bus word as a signed code.
///
/// Hardware readback delivers unsigned words; anything at or above the
/// sign bit is a negative two's-complement code.
///
/// # Panics
/// Panics if `bits` is outside 2..=48
#[inline]
pub fn from_raw(word: u64, bits: u32) -> i64 {
    assert_width(bits);
    let masked = (word & ((1u64 << bits) - 1)) as i64;
    if masked >= 1i64 << (bits - 1) {
        masked - (1i64 << bits)
    } else {
        masked
    }
}

/// Negate a `bits`-wide code, saturating at the positive extreme.
///
/// -2^(bits-1) has no negation in two's complement; it maps to
/// 2^(bits-1) - 1, half a quantization step short of the true mirror.
///
/// # Panics
/// Panics if `bits` is outside 2..=48
#[inline]
pub fn saturating_neg(value: i64, bits: u32) -> i64 {
    let (min, max) = range_of(bits);
    debug_assert!(
        value >= min && value <= max,
        "Code {} outside {}-bit range",
        value,
        bits
    );
    if value == min {
        max
    } else {
        -value
    }
}

/// Truncating encode without a range check. The caller checks the result
/// against whatever width actually holds it (the π seed lives at the
/// guard-extended width while using the data-path scale).
#[inline]
pub(crate) fn encode_trunc(value: f64, bits: u32) -> i64 {
    debug_assert!(value.is_finite());
    (value * scale_of(bits) as f64).trunc() as i64
}
