use std::fmt::Write as _;

/// Formats a coordinate for SVG output.
///
/// Values are rounded to six decimals, trailing zeros are dropped and
/// negative zero prints as `0`.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = (value * 1_000_000.0).round() / 1_000_000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let mut text = format!("{rounded:.6}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// `translate(x, y)` transform attribute value.
#[must_use]
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({}, {})", fmt_num(x), fmt_num(y))
}

/// Incremental builder for SVG path data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.data, "M{},{}", fmt_num(x), fmt_num(y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.data, "L{},{}", fmt_num(x), fmt_num(y));
        self
    }

    pub fn horizontal_to(&mut self, x: f64) -> &mut Self {
        let _ = write!(self.data, "H{}", fmt_num(x));
        self
    }

    pub fn vertical_to(&mut self, y: f64) -> &mut Self {
        let _ = write!(self.data, "V{}", fmt_num(y));
        self
    }

    /// Elliptical arc with equal radii.
    pub fn arc_to(&mut self, radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> &mut Self {
        let _ = write!(
            self.data,
            "A{r},{r} 0 {large},{sweep} {x},{y}",
            r = fmt_num(radius),
            large = u8::from(large_arc),
            sweep = u8::from(sweep),
            x = fmt_num(x),
            y = fmt_num(y),
        );
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.data.push('Z');
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.data)
    }
}
