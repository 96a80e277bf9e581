use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoronoiError {
    #[error("Site {index} has a non-finite coordinate: ({x}, {y})")]
    NonFiniteSite { index: usize, x: f64, y: f64 },

    #[error("Flat coordinate array has odd length {len}")]
    OddCoordinateCount { len: usize },

    #[error("Invalid bounding box: min {min:?}, max {max:?}")]
    InvalidBounds { min: [f64; 2], max: [f64; 2] },

    #[error("Padding must be finite and non-negative, got {padding}")]
    InvalidPadding { padding: f64 },

    #[error("Tolerance epsilon must be finite and positive, got {epsilon}")]
    InvalidTolerance { epsilon: f64 },

    #[error("Rounding distance must be finite and non-negative, got {distance}")]
    InvalidRoundingDistance { distance: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type VoronoiResult<T> = Result<T, VoronoiError>;
