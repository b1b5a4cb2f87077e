//! Token amounts and fixed-point fractions.
//!
//! Amounts are raw base units (u128) to avoid floating-point errors. Ledger
//! tokens and native value both use 18 decimals. Fractions (tax rates,
//! reward shares) are fixed-point numbers scaled by [`SCALE`].

/// Base units per whole token (18 decimals).
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Fixed-point one: a fraction `f` is stored as `f * SCALE`.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Whole tokens to base units. Panics on overflow, so only use with constants.
pub const fn units(whole: u128) -> u128 {
    whole * TOKEN_UNIT
}

/// `floor(x * y / SCALE)` without an intermediate overflow.
///
/// Splits `x = q * SCALE + r` so the product is `q * y + r * y / SCALE`, which
/// is exact. Returns `None` only if the result itself does not fit in u128
/// (or `y` exceeds `SCALE` by enough to overflow `r * y`).
pub fn frac_mul(x: u128, y: u128) -> Option<u128> {
    let q = x / SCALE;
    let r = x % SCALE;
    let high = q.checked_mul(y)?;
    let low = r.checked_mul(y)? / SCALE;
    high.checked_add(low)
}
