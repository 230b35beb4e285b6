//! Tick placement and labelling for the horizontal axis.
//!
//! Locators decide where ticks go within the visible interval, formatters turn
//! tick positions into labels. Date locators and formatters interpret axis
//! values as float days since the Unix epoch (see [`crate::plot::time_axis`]).
use serde::Serialize;
use tracing::warn;

use crate::plot::time_axis::num2date;

/// Upper bound on ticks produced by a single locator call.
pub const MAX_TICKS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    /// Roughly six ticks at 1, 2 or 5 times a power of ten.
    Auto,
    /// One tick at every midnight (UTC).
    Day,
    /// Ticks at the listed hours of every day.
    Hour(Vec<u32>),
}

impl Locator {
    pub fn hours(hours: &[u32]) -> Self {
        let mut hours: Vec<u32> = hours.iter().copied().filter(|h| *h < 24).collect();
        hours.sort_unstable();
        hours.dedup();
        Locator::Hour(hours)
    }

    /// Tick positions inside `[lo, hi]` (either order), ascending.
    pub fn locate(&self, lo: f64, hi: f64) -> Vec<f64> {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        let mut ticks = match self {
            Locator::Auto => auto_ticks(lo, hi),
            Locator::Day => {
                let first = lo.ceil() as i64;
                let last = hi.floor() as i64;
                (first..=last).take(MAX_TICKS + 1).map(|d| d as f64).collect()
            }
            Locator::Hour(hours) if hours.is_empty() => Vec::new(),
            Locator::Hour(hours) => {
                let mut out = Vec::new();
                'days: for day in (lo.floor() as i64)..=(hi.floor() as i64) {
                    for &h in hours {
                        let v = day as f64 + h as f64 / 24.0;
                        if v >= lo && v <= hi {
                            out.push(v);
                            if out.len() > MAX_TICKS {
                                break 'days;
                            }
                        }
                    }
                }
                out
            }
        };
        if ticks.len() > MAX_TICKS {
            warn!(
                "Locator {:?} exceeds {} ticks on [{}, {}]; truncating",
                self, MAX_TICKS, lo, hi
            );
            ticks.truncate(MAX_TICKS);
        }
        ticks
    }
}

fn auto_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    if span <= 0.0 {
        return vec![lo];
    }
    let step = nice_step(span / 6.0);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .take(MAX_TICKS + 1)
        .map(|k| k as f64 * step)
        .collect()
}

fn nice_step(raw: f64) -> f64 {
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickFormatter {
    /// Plain number with as many decimals as the tick spacing needs.
    Number,
    /// `chrono` strftime pattern applied to the tick position as a UTC date.
    Date(String),
}

impl TickFormatter {
    pub fn date(pattern: &str) -> Self {
        TickFormatter::Date(pattern.to_string())
    }

    pub fn format(&self, value: f64, spacing: f64) -> String {
        match self {
            TickFormatter::Number => {
                let decimals = if spacing > 0.0 && spacing.is_finite() {
                    (-spacing.log10().floor()).max(0.0) as usize
                } else {
                    0
                };
                format!("{:.*}", decimals, value)
            }
            TickFormatter::Date(pattern) => match num2date(value) {
                Some(dt) => dt.format(pattern).to_string(),
                None => String::new(),
            },
        }
    }
}

/// Tick configuration of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub major_locator: Locator,
    pub minor_locator: Option<Locator>,
    pub major_formatter: TickFormatter,
    pub minor_formatter: TickFormatter,
    /// Distance between the tick marks and their labels, in pixels
    pub major_pad: f64,
    pub minor_pad: f64,
}

impl Default for AxisTicks {
    fn default() -> Self {
        Self {
            major_locator: Locator::Auto,
            minor_locator: None,
            major_formatter: TickFormatter::Number,
            minor_formatter: TickFormatter::Number,
            major_pad: 3.5,
            minor_pad: 3.4,
        }
    }
}

impl AxisTicks {
    pub fn major_ticks(&self, lo: f64, hi: f64) -> Vec<Tick> {
        let values = self.major_locator.locate(lo, hi);
        label(&values, &self.major_formatter)
    }

    /// Minor ticks, leaving out positions already taken by a major tick.
    pub fn minor_ticks(&self, lo: f64, hi: f64) -> Vec<Tick> {
        let Some(locator) = &self.minor_locator else {
            return Vec::new();
        };
        let major = self.major_locator.locate(lo, hi);
        let values: Vec<f64> = locator
            .locate(lo, hi)
            .into_iter()
            .filter(|v| !major.iter().any(|m| (m - v).abs() < 1e-9))
            .collect();
        label(&values, &self.minor_formatter)
    }
}

fn label(values: &[f64], formatter: &TickFormatter) -> Vec<Tick> {
    let spacing = if values.len() > 1 {
        values[1] - values[0]
    } else {
        0.0
    };
    values
        .iter()
        .map(|&value| Tick {
            value,
            label: formatter.format(value, spacing),
        })
        .collect()
}
