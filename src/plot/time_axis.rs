use chrono::{DateTime, Utc};

use crate::plot::figure::{Axes, with_current_axes};
use crate::plot::ticks::{Locator, TickFormatter};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Axis value of a timestamp: float days since 1970-01-01T00:00Z.
pub fn date2num(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_micros() as f64 / MICROS_PER_DAY
}

/// Inverse of [`date2num`], at millisecond resolution.
pub fn num2date(num: f64) -> Option<DateTime<Utc>> {
    if !num.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((num * 86_400_000.0).round() as i64)
}

/// Configure the x axis for multi-day time series: a major tick every day
/// labelled `YYYY Mon DD`, minor ticks every 3 hours labelled `HH:MM`.
///
/// `None` configures the current figure's axes.
pub fn nice_time_axis(ax: Option<&mut Axes>) {
    match ax {
        Some(ax) => apply_time_axis(ax),
        None => with_current_axes(apply_time_axis),
    }
}

fn apply_time_axis(ax: &mut Axes) {
    let ticks = ax.xaxis_mut();
    ticks.major_locator = Locator::Day;
    ticks.minor_locator = Some(Locator::hours(&[0, 3, 6, 9, 12, 15, 18, 21]));
    ticks.major_formatter = TickFormatter::date("%Y %b %d");
    ticks.minor_formatter = TickFormatter::date("%H:%M");
    ticks.major_pad = 10.0;
}
