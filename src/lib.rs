//! easy-chart: data-driven line, pie and bar charts over a retained scene graph.
//!
//! A render pass resolves margins and scales, builds a [`render::SceneGraph`]
//! imperatively, reconciles data against the previous pass with
//! [`core::JoinPlan`], and freezes the result into an inert
//! [`render::ChartOutput`] for a declarative host. Pie slices tween between
//! passes through [`transition::TransitionScheduler`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod transition;

pub use api::{
    BarChart, BarChartConfig, ChartComponent, LineChart, LineChartConfig, PieChart,
    PieChartConfig,
};
pub use error::{ChartError, ChartResult};
