//! Chart components built on the core geometry, the scene graph and the
//! transition scheduler.

mod axis;
mod bar_chart;
mod component;
mod config;
mod line_chart;
mod palette;
mod pie_chart;
mod styles;

pub use axis::{AxisOrient, AxisSpec, draw_axis};
pub use bar_chart::BarChart;
pub use component::ChartComponent;
pub use config::{AxisLabels, BarChartConfig, JoinStrategy, LineChartConfig, PieChartConfig};
pub use line_chart::{CartesianLayout, LineChart};
pub use palette::{CATEGORY20, DEFAULT_LINE_COLORS, Palette};
pub use pie_chart::PieChart;
pub use styles::{axis_styles, compose_styles, default_styles};
