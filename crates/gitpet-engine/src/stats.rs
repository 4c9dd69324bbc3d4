//! Clamped arithmetic on the 0--100 pet stats.

use gitpet_types::MAX_STAT;

/// Raise a stat by `amount`, capped at [`MAX_STAT`].
pub fn raise(stat: u8, amount: u8) -> u8 {
    stat.saturating_add(amount).min(MAX_STAT)
}

/// Lower a stat by `amount`, floored at 0.
pub const fn lower(stat: u8, amount: u8) -> u8 {
    stat.saturating_sub(amount)
}

/// Round a fractional stat to the nearest integer and clamp it to
/// `0..=MAX_STAT`. Non-finite input clamps to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_round(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.round().clamp(0.0, f64::from(MAX_STAT));
    // In range 0..=100 after the clamp, so the cast is exact.
    clamped as u8
}
