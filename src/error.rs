//! Error types for the heat engine.
//!
//! Only the nearest-neighbour lookup can fail at runtime; everything else
//! here is configuration validation.

use std::fmt;

/// Errors raised by heat map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatMapError {
    /// A nearest-neighbour lookup ran against a map with no points.
    EmptyMap,
}

impl fmt::Display for HeatMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatMapError::EmptyMap => {
                write!(f, "Heat map is empty, cannot find the closest heat point")
            }
        }
    }
}

impl std::error::Error for HeatMapError {}

/// A tunable was outside the range the engine can work with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value must be finite and strictly positive.
    NotPositive { field: &'static str, value: f32 },
    /// Value must be finite.
    NotFinite { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be a positive finite number, got {}", field, value)
            }
            ConfigError::NotFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
