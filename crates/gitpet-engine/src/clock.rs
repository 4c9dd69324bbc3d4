//! Time helpers shared by the decay engine and the mood resolver.

use chrono::{DateTime, Utc};

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Fractional hours from `from` to `to`.
///
/// Negative when `to` is earlier than `from` (clock skew, hand-edited
/// state). Millisecond precision.
#[allow(clippy::cast_precision_loss)]
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = to.signed_duration_since(from).num_milliseconds();
    millis as f64 / MILLIS_PER_HOUR
}

/// Fractional hours elapsed since `then`, or `None` if `then` is unknown.
pub fn hours_since(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    then.map(|t| hours_between(t, now))
}

/// The latest of several optional timestamps.
///
/// Returns `None` when no candidate is present; callers treat that as
/// "nothing to measure from" and skip the time-based step entirely.
pub fn latest_timestamp<I>(candidates: I) -> Option<DateTime<Utc>>
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    candidates.into_iter().flatten().max()
}
