//! Configuration errors raised before an engine is allowed to run.

use std::fmt;

/// Reasons a [`HeatMapConfig`](crate::HeatMapConfig) is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required quantity is zero, negative or NaN.
    NonPositive {
        /// Config field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A float field holds an infinite value.
    NotFinite {
        /// Config field name.
        field: &'static str,
    },
    /// The grid would have no cells.
    EmptyGrid {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
    /// The grid has more cells than a buffer can address.
    GridTooLarge {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
    /// A float field exceeds its upper bound.
    OutOfRange {
        /// Config field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// One of the tuning constants is out of range.
    InvalidTuning {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            }
            Self::NotFinite { field } => write!(f, "{field} must be finite"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell (got {width}x{height})")
            }
            Self::GridTooLarge { width, height } => {
                write!(f, "grid of {width}x{height} cells is too large")
            }
            Self::OutOfRange { field, value, max } => {
                write!(f, "{field} must be <= {max} (got {value})")
            }
            Self::InvalidTuning { reason } => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
