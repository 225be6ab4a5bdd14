//! The cashback policy.
//!
//! Every charge relayed through the network earns the buyer a flat-rate cashback. The rate is expressed in basis
//! points and the rounding happens in integer arithmetic so that the reward for a given amount is the same on every
//! platform and every run.

use cbr_common::Money;

/// The network-wide cashback rate, in basis points (150 = 1.5%).
pub const CASHBACK_RATE_BASIS_POINTS: i64 = 150;

const BASIS_POINT_SCALE: i64 = 10_000;

/// The cashback earned on a charge of `amount`, rounded half-up to the nearest minor unit.
///
/// Callers pass non-negative amounts; the relay rejects non-positive charges before any cashback is computed.
/// Amounts large enough to overflow the scaled intermediate saturate rather than wrap.
pub fn cashback_for(amount: Money) -> Money {
    let scaled = amount.value().saturating_mul(CASHBACK_RATE_BASIS_POINTS);
    let reward = scaled.saturating_add(BASIS_POINT_SCALE / 2) / BASIS_POINT_SCALE;
    Money::from_cents(reward)
}
