use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Signed hours from `earlier` to `later`; negative when `earlier` lies in the future.
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    later.signed_duration_since(earlier).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Continuous exponential decay. Negative `hours` yield a factor above 1.
pub fn decay_factor(hours: f64, rate_per_hour: f64) -> f64 {
    (-rate_per_hour * hours).exp()
}
