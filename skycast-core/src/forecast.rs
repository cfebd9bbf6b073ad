//! Forecast normalization for the hourly strip.

use crate::model::{ForecastDay, HourSample};

/// Merge "rest of today" with "all of tomorrow" into one forward-looking
/// hourly timeline.
///
/// `now_hour` is the wall-clock hour on the local device at the moment of
/// normalization, not the API's `localtime`. The drop is clamped to the
/// hours actually present in day 0. An empty `days` slice yields an empty
/// timeline; the daily list is rendered from the unmodified `days` slice
/// and is never trimmed here.
pub fn hourly_timeline(days: &[ForecastDay], now_hour: usize) -> Vec<HourSample> {
    let Some(today) = days.first() else {
        return Vec::new();
    };

    let skip = now_hour.min(today.hour.len());
    let mut timeline = today.hour[skip..].to_vec();

    if let Some(tomorrow) = days.get(1) {
        timeline.extend(tomorrow.hour.iter().cloned());
    }

    timeline
}
