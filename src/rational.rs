//! Conversions between floating point numbers and the two-field TIFF rationals.
//!
//! A rational of `0/0` means "unknown". It decodes as zero, and encoding exactly zero writes it
//! back as `0/0` so untouched unknown values survive a read/write cycle.

/// Upper bound on the denominator of an approximated rational.
pub const MAX_DENOMINATOR: u64 = 1_000_000;

/// Decode an unsigned rational. Any zero denominator decodes as zero.
pub fn decode_unsigned(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Decode a signed rational. Any zero denominator decodes as zero.
pub fn decode_signed(numerator: i32, denominator: i32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Encode `value` as an unsigned rational.
///
/// Returns `None` for negative, non-finite, or out-of-range values.
pub fn encode_unsigned(value: f64) -> Option<(u32, u32)> {
    if value == 0.0 {
        return Some((0, 0));
    }
    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    let ceiling = denominator_ceiling(value, u32::MAX as f64);
    let (numerator, denominator) = approximate(value, ceiling);
    Some((
        u32::try_from(numerator).ok()?,
        u32::try_from(denominator).ok()?,
    ))
}

/// Encode `value` as a signed rational with a positive denominator.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn encode_signed(value: f64) -> Option<(i32, i32)> {
    if value == 0.0 {
        return Some((0, 0));
    }
    let magnitude = value.abs();
    if !magnitude.is_finite() || magnitude > i32::MAX as f64 {
        return None;
    }
    let ceiling = denominator_ceiling(magnitude, i32::MAX as f64);
    let (numerator, denominator) = approximate(magnitude, ceiling);
    let numerator = i32::try_from(numerator).ok()?;
    let denominator = i32::try_from(denominator).ok()?;
    Some((numerator * value.signum() as i32, denominator))
}

/// Largest denominator that keeps the numerator of `magnitude` within `numerator_max`.
fn denominator_ceiling(magnitude: f64, numerator_max: f64) -> u64 {
    let fitting = (numerator_max / magnitude).floor();
    if fitting >= MAX_DENOMINATOR as f64 {
        MAX_DENOMINATOR
    } else {
        (fitting as u64).max(1)
    }
}

/// Best rational approximation of a non-negative `x` with denominator at most `max_denominator`.
///
/// Walks the continued fraction expansion of `x` and finishes with the closer of the last
/// convergent and the best semiconvergent under the ceiling.
fn approximate(x: f64, max_denominator: u64) -> (u64, u64) {
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let mut rest = x;
    for _ in 0..64 {
        let a = rest.floor();
        if q1 != 0 && a > ((max_denominator - q0) / q1) as f64 {
            break;
        }
        let a = a as u64;
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q0 + a * q1);
        let fraction = rest - rest.floor();
        if fraction == 0.0 || p1 as f64 / q1 as f64 == x {
            break;
        }
        rest = 1.0 / fraction;
    }

    let k = (max_denominator - q0) / q1;
    let (p2, q2) = (p0 + k * p1, q0 + k * q1);
    let convergent_error = (p1 as f64 / q1 as f64 - x).abs();
    let semiconvergent_error = (p2 as f64 / q2 as f64 - x).abs();
    if semiconvergent_error < convergent_error {
        (p2, q2)
    } else {
        (p1, q1)
    }
}
