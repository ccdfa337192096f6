use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, OrdinalScale, Scale, ScaleKind};
use crate::core::types::AxisValue;
use crate::error::{ChartError, ChartResult};

/// Band padding used for ordinal x-axes.
pub const ORDINAL_BAND_PADDING: f64 = 0.1;

/// Which chart axis a scale serves.
///
/// Vertical axes grow upwards, so their pixel range is flipped to
/// `[length, 0]` while the domain keeps its natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisId {
    X,
    Y,
}

impl AxisId {
    #[must_use]
    pub fn pixel_range(self, length: f64) -> (f64, f64) {
        match self {
            Self::X => (0.0, length),
            Self::Y => (length, 0.0),
        }
    }
}

/// Inputs of one scale generation request.
#[derive(Debug, Clone, Copy)]
pub struct ScaleSpec<'a> {
    pub axis: AxisId,
    pub kind: ScaleKind,
    pub domain_override: Option<&'a [AxisValue; 2]>,
    pub length: f64,
}

impl<'a> ScaleSpec<'a> {
    #[must_use]
    pub fn new(axis: AxisId, kind: ScaleKind, length: f64) -> Self {
        Self {
            axis,
            kind,
            domain_override: None,
            length,
        }
    }

    #[must_use]
    pub fn with_domain_override(mut self, domain: Option<&'a [AxisValue; 2]>) -> Self {
        self.domain_override = domain;
        self
    }
}

/// Converts a raw axis value into the numeric domain of a continuous scale.
///
/// Time values given as text go through `parse_date`; numeric time values are
/// taken as epoch milliseconds.
pub fn numeric_value<F>(kind: ScaleKind, value: &AxisValue, parse_date: &F) -> ChartResult<f64>
where
    F: Fn(&str) -> ChartResult<f64> + ?Sized,
{
    let number = match (kind, value) {
        (ScaleKind::Time, AxisValue::Text(text)) => parse_date(text)?,
        (_, AxisValue::Number(number)) => *number,
        (ScaleKind::Linear, AxisValue::Text(text)) => text.trim().parse::<f64>().map_err(|_| {
            ChartError::InvalidData(format!("`{text}` is not a number for a linear scale"))
        })?,
        (ScaleKind::Ordinal, AxisValue::Text(text)) => {
            return Err(ChartError::InvalidData(format!(
                "ordinal value `{text}` has no numeric position"
            )));
        }
    };

    if !number.is_finite() {
        return Err(ChartError::InvalidData(
            "axis values must be finite".to_owned(),
        ));
    }
    Ok(number)
}

/// Builds the scale for one axis.
///
/// An explicit domain override is used verbatim. Otherwise continuous domains
/// span the extent of `values` and ordinal domains list the distinct values in
/// first-seen order. A zero-length pixel range is allowed and yields a
/// degenerate scale.
pub fn generate_scale<'v, I, F>(spec: ScaleSpec<'_>, values: I, parse_date: &F) -> ChartResult<Scale>
where
    I: IntoIterator<Item = &'v AxisValue>,
    F: Fn(&str) -> ChartResult<f64> + ?Sized,
{
    if !spec.length.is_finite() || spec.length < 0.0 {
        return Err(ChartError::InvalidData(
            "scale length must be finite and >= 0".to_owned(),
        ));
    }
    let range = spec.axis.pixel_range(spec.length);

    if spec.kind == ScaleKind::Ordinal {
        let categories: Vec<String> = match spec.domain_override {
            Some(domain) => domain.iter().map(AxisValue::label).collect(),
            None => values.into_iter().map(AxisValue::label).collect(),
        };
        return OrdinalScale::bands(categories, range, ORDINAL_BAND_PADDING).map(Scale::Ordinal);
    }

    let domain = match spec.domain_override {
        Some([start, end]) => (
            numeric_value(spec.kind, start, parse_date)?,
            numeric_value(spec.kind, end, parse_date)?,
        ),
        None => extent(spec.kind, values, parse_date)?,
    };

    let scale = match spec.kind {
        ScaleKind::Time => LinearScale::time(domain, range)?,
        _ => LinearScale::new(domain, range)?,
    };
    Ok(Scale::Continuous(scale))
}

fn extent<'v, I, F>(kind: ScaleKind, values: I, parse_date: &F) -> ChartResult<(f64, f64)>
where
    I: IntoIterator<Item = &'v AxisValue>,
    F: Fn(&str) -> ChartResult<f64> + ?Sized,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        let number = numeric_value(kind, value, parse_date)?;
        min = min.min(number);
        max = max.max(number);
    }

    if min > max {
        return Ok((0.0, 0.0));
    }
    Ok((min, max))
}

/// Maps a raw value through a generated scale.
///
/// Ordinal scales return the start of the category band.
pub fn map_value<F>(scale: &Scale, value: &AxisValue, parse_date: &F) -> ChartResult<f64>
where
    F: Fn(&str) -> ChartResult<f64> + ?Sized,
{
    match scale {
        Scale::Continuous(continuous) => {
            let number = numeric_value(continuous.kind(), value, parse_date)?;
            Ok(continuous.map(number))
        }
        Scale::Ordinal(ordinal) => {
            let label = value.label();
            ordinal.map(&label).ok_or_else(|| {
                ChartError::InvalidData(format!("`{label}` is not in the ordinal domain"))
            })
        }
    }
}
