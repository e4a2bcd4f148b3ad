//! Decaying 3D focus heatmap.
//!
//! [`HeatAccumulator`] owns the raw point → heat mapping: producers add heat
//! at gaze/focus hits and cool the whole map down per sample. A
//! [`FieldSynthesizer`] reads that raw set and builds a denser processed
//! field for display by filling the gap between every point and its nearest
//! neighbour.
//!
//! Everything is single-threaded and synchronous. Wrap the accumulator in a
//! mutex if producers and consumers live on different threads.

pub mod config;
pub mod error;
pub mod field;
pub mod focus;
pub mod heatmap;
pub mod point;
pub mod probe;
pub mod spatial;
pub mod stats;

pub use config::{HeatMapConfig, SampleConfig};
pub use error::{ConfigError, HeatMapError};
pub use field::FieldSynthesizer;
pub use focus::{FocusSample, FocusTracker};
pub use heatmap::{CooldownReport, HeatAccumulator};
pub use point::{HeatField, HeatPoint, PointKey, ProcessedHeatMap, RawHeatMap};
pub use probe::ProbeSet;

pub use glam::Vec3;
