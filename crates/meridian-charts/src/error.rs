//! Error types for the chart adapters

use thiserror::Error;

/// Chart-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Render configuration is unusable (non-positive size, empty id)
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    /// A palette was built with no colors
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    /// A series record could not be turned into a point
    #[error("Malformed series entry at index {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    /// Series input was not a sequence of records
    #[error("Expected an array of series records, got {0}")]
    NotASequence(String),

    /// Color string is not `#RRGGBB` or `#RRGGBBAA`
    #[error("Invalid color string: {0}")]
    InvalidColor(String),
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
