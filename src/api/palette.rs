/// Built-in line colors, used after any application-supplied colors.
pub const DEFAULT_LINE_COLORS: [&str; 4] = ["#3F4C55", "#E3A51A", "#F4E956", "#AAAC84"];

/// Twenty-color categorical palette used for slices and colored bars.
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Ordered color list indexed by element position; indices past the end wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// `overrides` first, then `defaults`.
    #[must_use]
    pub fn with_overrides(overrides: &[String], defaults: &[&str]) -> Self {
        let colors = overrides
            .iter()
            .cloned()
            .chain(defaults.iter().map(|color| (*color).to_owned()))
            .collect();
        Self { colors }
    }

    #[must_use]
    pub fn category20() -> Self {
        Self::with_overrides(&[], &CATEGORY20)
    }

    #[must_use]
    pub fn color(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "none";
        }
        &self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
