use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;
// 1970-01-04 was the first Sunday after the epoch.
const SUNDAY_ANCHOR_MS: f64 = 3.0 * DAY_MS;

/// Domain interpretation of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Time,
    #[serde(rename = "text", alias = "ordinal")]
    Ordinal,
}

/// Continuous mapping for linear and time domains.
///
/// Time domains are expressed in epoch milliseconds (UTC). Values outside the
/// domain extrapolate linearly; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    kind: ScaleKind,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Self::with_kind(ScaleKind::Linear, domain, range)
    }

    pub fn time(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Self::with_kind(ScaleKind::Time, domain, range)
    }

    fn with_kind(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if kind == ScaleKind::Ordinal {
            return Err(ChartError::InvalidConfig(
                "continuous scale cannot use an ordinal domain".to_owned(),
            ));
        }
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            kind,
        })
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to a pixel position.
    ///
    /// A zero-span domain maps every value to the start of the range.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Tick values for roughly `count` intervals.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match self.kind {
            ScaleKind::Time => time_ticks(self.domain_start, self.domain_end, count),
            _ => linear_ticks(self.domain_start, self.domain_end, count),
        }
    }

    /// Label for a tick produced by [`LinearScale::ticks`] with the same `count`.
    #[must_use]
    pub fn format_tick(self, value: f64, count: usize, time_format: Option<&str>) -> String {
        match self.kind {
            ScaleKind::Time => format_time_tick(value, time_format),
            _ => {
                let precision = linear_tick_range(self.domain_start, self.domain_end, count)
                    .map_or(0, |(_, _, step)| step_precision(step));
                format_grouped(value, precision)
            }
        }
    }
}

/// Band mapping for categorical domains.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    categories: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
    step: f64,
    first: f64,
}

impl OrdinalScale {
    /// Splits the range into one band per distinct category, with `padding`
    /// as the fraction of each step left empty (also applied at both ends).
    pub fn bands(
        categories: impl IntoIterator<Item = String>,
        range: (f64, f64),
        padding: f64,
    ) -> ChartResult<Self> {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidConfig(
                "ordinal band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        let categories: IndexSet<String> = categories.into_iter().collect();
        let count = categories.len() as f64;
        let low = range.0.min(range.1);
        let high = range.0.max(range.1);
        let step = if categories.is_empty() {
            0.0
        } else {
            (high - low) / (count + padding)
        };

        Ok(Self {
            categories,
            range_start: range.0,
            range_end: range.1,
            padding,
            step,
            first: low + step * padding,
        })
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.step * (1.0 - self.padding)
    }

    /// Start of the band for `category`, or `None` for unknown categories.
    #[must_use]
    pub fn map(&self, category: &str) -> Option<f64> {
        let index = self.categories.get_index_of(category)?;
        let slot = if self.range_end < self.range_start {
            self.categories.len() - 1 - index
        } else {
            index
        };
        Some(self.first + self.step * slot as f64)
    }
}

/// Scale produced by the scale generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Continuous(LinearScale),
    Ordinal(OrdinalScale),
}

impl Scale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous(scale) => scale.kind(),
            Self::Ordinal(_) => ScaleKind::Ordinal,
        }
    }

    #[must_use]
    pub fn as_continuous(&self) -> Option<LinearScale> {
        match self {
            Self::Continuous(scale) => Some(*scale),
            Self::Ordinal(_) => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&OrdinalScale> {
        match self {
            Self::Continuous(_) => None,
            Self::Ordinal(scale) => Some(scale),
        }
    }

    /// Sorted `(min, max)` pixel extent covered by the scale.
    #[must_use]
    pub fn range_extent(&self) -> (f64, f64) {
        let (start, end) = match self {
            Self::Continuous(scale) => scale.range(),
            Self::Ordinal(scale) => scale.range(),
        };
        (start.min(end), start.max(end))
    }
}

fn linear_tick_range(start: f64, end: f64, count: usize) -> Option<(f64, f64, f64)> {
    let min = start.min(end);
    let max = start.max(end);
    let span = max - min;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let target = count as f64;
    let mut step = 10_f64.powf((span / target).log10().floor());
    let error = target / span * step;
    if error <= 0.15 {
        step *= 10.0;
    } else if error <= 0.35 {
        step *= 5.0;
    } else if error <= 0.75 {
        step *= 2.0;
    }

    let first = (min / step).ceil() * step;
    let last = (max / step).floor() * step + step * 0.5;
    Some((first, last, step))
}

fn step_precision(step: f64) -> usize {
    let digits = -(step.log10() + 0.01).floor();
    if digits > 0.0 { digits as usize } else { 0 }
}

fn linear_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    let Some((first, last, step)) = linear_tick_range(start, end, count) else {
        if count > 0 && start == end && start.is_finite() {
            return vec![start];
        }
        return Vec::new();
    };

    let scale = 10_f64.powi(step_precision(step) as i32);
    if !scale.is_finite() {
        return Vec::new();
    }
    let mut ticks = Vec::new();
    let mut index = 0_u32;
    loop {
        let value = ((first + step * f64::from(index)) * scale).round() / scale;
        let stalled = ticks.last().is_some_and(|&prev| value <= prev);
        if !value.is_finite() || value >= last || stalled {
            break;
        }
        ticks.push(value);
        index += 1;
    }
    ticks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeUnit {
    fn millis(self) -> f64 {
        match self {
            Self::Second => SECOND_MS,
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Week => WEEK_MS,
            Self::Month => MONTH_MS,
        }
    }
}

const TIME_INTERVALS: [(TimeUnit, u32); 17] = [
    (TimeUnit::Second, 1),
    (TimeUnit::Second, 5),
    (TimeUnit::Second, 15),
    (TimeUnit::Second, 30),
    (TimeUnit::Minute, 1),
    (TimeUnit::Minute, 5),
    (TimeUnit::Minute, 15),
    (TimeUnit::Minute, 30),
    (TimeUnit::Hour, 1),
    (TimeUnit::Hour, 3),
    (TimeUnit::Hour, 6),
    (TimeUnit::Hour, 12),
    (TimeUnit::Day, 1),
    (TimeUnit::Day, 2),
    (TimeUnit::Week, 1),
    (TimeUnit::Month, 1),
    (TimeUnit::Month, 3),
];

fn interval_millis((unit, step): (TimeUnit, u32)) -> f64 {
    unit.millis() * f64::from(step)
}

fn time_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    let min = start.min(end);
    let max = start.max(end);
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }

    let target = (max - min) / count as f64;
    let index = TIME_INTERVALS.partition_point(|interval| interval_millis(*interval) < target);
    if index == TIME_INTERVALS.len() {
        return year_ticks(min, max, count);
    }
    if index == 0 {
        return linear_ticks(min, max, count);
    }

    let below = TIME_INTERVALS[index - 1];
    let above = TIME_INTERVALS[index];
    let interval = if target / interval_millis(below) < interval_millis(above) / target {
        below
    } else {
        above
    };

    match interval.0 {
        TimeUnit::Month => month_ticks(min, max, interval.1),
        TimeUnit::Week => fixed_ticks(min, max, interval_millis(interval), SUNDAY_ANCHOR_MS),
        _ => fixed_ticks(min, max, interval_millis(interval), 0.0),
    }
}

fn fixed_ticks(min: f64, max: f64, step: f64, anchor: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut value = ((min - anchor) / step).ceil() * step + anchor;
    while value <= max {
        ticks.push(value);
        value += step;
    }
    ticks
}

fn datetime_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis as i64)
}

fn month_start_millis(year: i32, month: u32) -> Option<f64> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64)
}

fn month_ticks(min: f64, max: f64, step: u32) -> Vec<f64> {
    let Some(start) = datetime_from_millis(min) else {
        return Vec::new();
    };

    let mut year = start.year();
    let mut month0 = start.month0();
    let mut ticks = Vec::new();
    while let Some(value) = month_start_millis(year, month0 + 1) {
        if value > max {
            break;
        }
        if value >= min && month0 % step == 0 {
            ticks.push(value);
        }
        month0 += 1;
        if month0 == 12 {
            month0 = 0;
            year += 1;
        }
    }
    ticks
}

fn year_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let (Some(start), Some(end)) = (datetime_from_millis(min), datetime_from_millis(max)) else {
        return Vec::new();
    };
    let first_year = f64::from(start.year());
    let last_year = f64::from(end.year()) + (max - month_start_millis(end.year(), 1).unwrap_or(max)) / YEAR_MS;
    let step = linear_tick_range(first_year, last_year, count)
        .map_or(1.0, |(_, _, step)| step.max(1.0).round());

    let mut ticks = Vec::new();
    let mut year = (first_year / step).floor() * step;
    while year <= last_year {
        if let Some(value) = month_start_millis(year as i32, 1) {
            if value >= min && value <= max {
                ticks.push(value);
            }
        }
        year += step;
    }
    ticks
}

fn pattern_is_valid(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn format_time_tick(value: f64, time_format: Option<&str>) -> String {
    let Some(time) = datetime_from_millis(value) else {
        return format_grouped(value, 0);
    };

    let pattern = match time_format {
        Some(pattern) if pattern_is_valid(pattern) => pattern,
        _ => default_time_pattern(&time),
    };
    let mut label = String::new();
    if write!(label, "{}", time.format(pattern)).is_err() {
        label.clear();
        let _ = write!(label, "{}", time.format("%Y-%m-%d"));
    }
    label
}

fn default_time_pattern(time: &DateTime<Utc>) -> &'static str {
    if time.timestamp_subsec_millis() != 0 {
        "%.3f"
    } else if time.second() != 0 {
        ":%S"
    } else if time.minute() != 0 {
        "%I:%M"
    } else if time.hour() != 0 {
        "%I %p"
    } else if time.weekday().num_days_from_sunday() != 0 && time.day() != 1 {
        "%a %d"
    } else if time.day() != 1 {
        "%b %d"
    } else if time.month0() != 0 {
        "%B"
    } else {
        "%Y"
    }
}

/// Fixed-precision number with `,` thousands grouping.
fn format_grouped(value: f64, precision: usize) -> String {
    let digits = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_use_nice_steps() {
        assert_eq!(
            linear_ticks(0.0, 10.0, 10),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(linear_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 4), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn degenerate_domain_yields_single_tick() {
        assert_eq!(linear_ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn subnormal_domain_terminates() {
        assert!(linear_ticks(0.0, 1e-309, 10).len() <= 11);
        assert!(linear_ticks(1e15, 1e15 + 1e-3, 10).len() <= 11);
    }

    #[test]
    fn grouped_format_inserts_separators() {
        assert_eq!(format_grouped(1_234_567.0, 0), "1,234,567");
        assert_eq!(format_grouped(-1_000.5, 1), "-1,000.5");
        assert_eq!(format_grouped(-0.0001, 2), "0.00");
        assert_eq!(format_grouped(12.0, 0), "12");
    }

    #[test]
    fn daily_span_produces_midnight_ticks() {
        let start = month_start_millis(2016, 1).expect("valid date");
        let end = start + 4.0 * DAY_MS;
        let ticks = time_ticks(start, end, 4);
        assert_eq!(ticks.len(), 5);
        assert!(ticks.iter().all(|tick| tick % DAY_MS == 0.0));
    }

    #[test]
    fn monthly_span_aligns_to_first_of_month() {
        let start = month_start_millis(2016, 1).expect("valid date") + DAY_MS * 3.0;
        let end = month_start_millis(2016, 12).expect("valid date");
        let ticks = time_ticks(start, end, 10);
        assert!(!ticks.is_empty());
        for tick in ticks {
            let time = datetime_from_millis(tick).expect("in range");
            assert_eq!(time.day(), 1);
        }
    }

    #[test]
    fn default_time_pattern_prefers_coarsest_unit() {
        let new_year = datetime_from_millis(month_start_millis(2016, 1).expect("valid"))
            .expect("in range");
        assert_eq!(default_time_pattern(&new_year), "%Y");
        let march = datetime_from_millis(month_start_millis(2016, 3).expect("valid"))
            .expect("in range");
        assert_eq!(default_time_pattern(&march), "%B");
    }
}
