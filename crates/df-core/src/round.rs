//! Decimal rounding used to decide snapshot equality and opinion clusters.
//!
//! Rounding is half-to-even on the scaled value, `(x * 10^k).round_ties_even()`,
//! so `round_to(0.125, 2) == 0.12` and `round_to(0.135, 2) == 0.14` (modulo
//! the binary representation of the input).

#[inline]
fn scale(ndigits: u32) -> f64 {
    10f64.powi(ndigits as i32)
}

/// Round `x` to `ndigits` decimal places.
#[inline]
pub fn round_to(x: f64, ndigits: u32) -> f64 {
    let s = scale(ndigits);
    (x * s).round_ties_even() / s
}

/// `true` iff `a` and `b` are equal after rounding to `ndigits` places.
#[inline]
pub fn rounded_eq(a: f64, b: f64, ndigits: u32) -> bool {
    let s = scale(ndigits);
    (a * s).round_ties_even() == (b * s).round_ties_even()
}
