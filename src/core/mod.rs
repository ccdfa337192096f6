pub mod date_parser;
pub mod element_state;
pub mod join;
pub mod line_path;
pub mod margin;
pub mod path;
pub mod pie_layout;
pub mod scale;
pub mod scale_generator;
pub mod types;

pub use date_parser::{DEFAULT_DATE_PATTERN, DateParser, DateParserCache};
pub use element_state::{PersistedElementState, RenderRole};
pub use join::{JoinCounts, JoinPair, JoinPlan};
pub use line_path::{LineInterpolation, line_path};
pub use margin::{Margin, MarginOverride, PlotArea, calculate_margin, reduce};
pub use pie_layout::{ArcGenerator, ArcGeometry, PieArc, pie_layout};
pub use scale::{LinearScale, OrdinalScale, Scale, ScaleKind};
pub use scale_generator::{AxisId, ScaleSpec, generate_scale, map_value, numeric_value};
pub use types::{AxisValue, DataPoint, PieSlice, Series, Viewport};
