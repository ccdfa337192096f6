use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart data is required but was not provided")]
    MissingData,

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid date pattern `{pattern}`: {reason}")]
    InvalidDatePattern { pattern: String, reason: String },

    #[error("cannot parse `{value}` with date pattern `{pattern}`: {reason}")]
    DateParse {
        pattern: String,
        value: String,
        reason: String,
    },

    #[error("unknown scene node: {0}")]
    UnknownNode(usize),
}
