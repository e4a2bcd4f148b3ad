//! Engine tunables.
//!
//! Defaults match the values the engine was tuned with. Every field can be
//! overridden in code with the `with_*` builders or from `GAZEHEAT_*`
//! environment variables via `from_env`.

use std::str::FromStr;

use crate::error::ConfigError;

/// Minimum visual spacing between rendered points (world units).
pub const DEFAULT_POINT_RADIUS: f32 = 0.05;
/// Power applied to distance in the radial contribution.
pub const DEFAULT_FALLOFF_EXPONENT: f32 = 1.0;
/// Base heat given to each interpolated point before source contributions.
pub const DEFAULT_SYNTHETIC_BASE_HEAT: f32 = 0.1;
/// Spatial index cell size. About the focus-shift distance, so most
/// nearest-neighbour hits land within the first ring of cells.
pub const DEFAULT_SPATIAL_CELL_SIZE: f32 = 0.25;

/// Heat added per accepted focus sample.
pub const DEFAULT_HEAT_INCREMENT: f32 = 1.1;
/// Heat removed from every point per accepted focus sample.
pub const DEFAULT_COOLDOWN: f32 = 0.007;
/// Minimum focus movement before a new sample is taken.
pub const DEFAULT_FOCUS_SHIFT_THRESHOLD: f32 = 0.25;
/// Probes reading below this are dropped after a refresh.
pub const DEFAULT_PROBE_MIN_HEAT: f32 = 0.1;

/// Accumulator and field synthesis settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatMapConfig {
    /// Interpolation density control: fill points are spaced `2 * point_radius`.
    pub point_radius: f32,
    /// Exponent on distance in `heat / distance^exponent`.
    pub falloff_exponent: f32,
    /// Evict points whose heat cools to zero or below.
    pub remove_cool_points: bool,
    pub synthetic_base_heat: f32,
    /// `None` disables the spatial index; lookups use a linear scan.
    pub spatial_cell_size: Option<f32>,
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        Self {
            point_radius: DEFAULT_POINT_RADIUS,
            falloff_exponent: DEFAULT_FALLOFF_EXPONENT,
            remove_cool_points: false,
            synthetic_base_heat: DEFAULT_SYNTHETIC_BASE_HEAT,
            spatial_cell_size: Some(DEFAULT_SPATIAL_CELL_SIZE),
        }
    }
}

impl HeatMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_radius(mut self, radius: f32) -> Self {
        self.point_radius = radius;
        self
    }

    pub fn with_falloff_exponent(mut self, exponent: f32) -> Self {
        self.falloff_exponent = exponent;
        self
    }

    pub fn with_remove_cool_points(mut self, remove: bool) -> Self {
        self.remove_cool_points = remove;
        self
    }

    pub fn with_synthetic_base_heat(mut self, heat: f32) -> Self {
        self.synthetic_base_heat = heat;
        self
    }

    pub fn with_spatial_cell_size(mut self, cell_size: Option<f32>) -> Self {
        self.spatial_cell_size = cell_size;
        self
    }

    /// Defaults overridden by any `GAZEHEAT_*` variables that are set.
    ///
    /// `GAZEHEAT_CELL_SIZE=0` disables the spatial index.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_value("GAZEHEAT_POINT_RADIUS") {
            config.point_radius = v;
        }
        if let Some(v) = env_value("GAZEHEAT_FALLOFF_EXPONENT") {
            config.falloff_exponent = v;
        }
        if let Some(v) = env_value("GAZEHEAT_REMOVE_COOL_POINTS") {
            config.remove_cool_points = v;
        }
        if let Some(v) = env_value("GAZEHEAT_BASE_HEAT") {
            config.synthetic_base_heat = v;
        }
        if let Some(v) = env_value::<f32>("GAZEHEAT_CELL_SIZE") {
            config.spatial_cell_size = if v == 0.0 { None } else { Some(v) };
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("point_radius", self.point_radius)?;
        finite("falloff_exponent", self.falloff_exponent)?;
        finite("synthetic_base_heat", self.synthetic_base_heat)?;
        if let Some(cell_size) = self.spatial_cell_size {
            positive("spatial_cell_size", cell_size)?;
        }
        Ok(())
    }
}

/// Producer-side settings: how focus hits turn into heat samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub heat_increment: f32,
    pub cooldown: f32,
    pub focus_shift_threshold: f32,
    /// Snap accepted points to this grid so repeat visits hit the same key.
    pub snap_size: Option<f32>,
    pub probe_min_heat: f32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            heat_increment: DEFAULT_HEAT_INCREMENT,
            cooldown: DEFAULT_COOLDOWN,
            focus_shift_threshold: DEFAULT_FOCUS_SHIFT_THRESHOLD,
            snap_size: None,
            probe_min_heat: DEFAULT_PROBE_MIN_HEAT,
        }
    }
}

impl SampleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heat_increment(mut self, increment: f32) -> Self {
        self.heat_increment = increment;
        self
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_focus_shift_threshold(mut self, threshold: f32) -> Self {
        self.focus_shift_threshold = threshold;
        self
    }

    pub fn with_snap_size(mut self, snap: Option<f32>) -> Self {
        self.snap_size = snap;
        self
    }

    pub fn with_probe_min_heat(mut self, min_heat: f32) -> Self {
        self.probe_min_heat = min_heat;
        self
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_value("GAZEHEAT_HEAT_INCREMENT") {
            config.heat_increment = v;
        }
        if let Some(v) = env_value("GAZEHEAT_COOLDOWN") {
            config.cooldown = v;
        }
        if let Some(v) = env_value("GAZEHEAT_FOCUS_SHIFT") {
            config.focus_shift_threshold = v;
        }
        if let Some(v) = env_value::<f32>("GAZEHEAT_SNAP_SIZE") {
            config.snap_size = if v == 0.0 { None } else { Some(v) };
        }
        if let Some(v) = env_value("GAZEHEAT_PROBE_MIN_HEAT") {
            config.probe_min_heat = v;
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("heat_increment", self.heat_increment)?;
        positive("cooldown", self.cooldown)?;
        finite("focus_shift_threshold", self.focus_shift_threshold)?;
        finite("probe_min_heat", self.probe_min_heat)?;
        if let Some(snap) = self.snap_size {
            positive("snap_size", snap)?;
        }
        Ok(())
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => {
            log::info!("Using {} from environment: {}", name, raw.trim());
            Some(v)
        }
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let heat = HeatMapConfig::default();
        assert_eq!(heat.point_radius, 0.05);
        assert_eq!(heat.falloff_exponent, 1.0);
        assert!(!heat.remove_cool_points);
        assert!(heat.validate().is_ok());

        let sample = SampleConfig::default();
        assert_eq!(sample.heat_increment, 1.1);
        assert_eq!(sample.cooldown, 0.007);
        assert!(sample.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = HeatMapConfig::new().with_point_radius(0.0).validate();
        assert_eq!(
            err,
            Err(ConfigError::NotPositive {
                field: "point_radius",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_bad_cell_size_only_when_enabled() {
        assert!(HeatMapConfig::new()
            .with_spatial_cell_size(Some(-1.0))
            .validate()
            .is_err());
        assert!(HeatMapConfig::new()
            .with_spatial_cell_size(None)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_nan_exponent() {
        assert!(HeatMapConfig::new()
            .with_falloff_exponent(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn rejects_zero_snap() {
        assert!(SampleConfig::new().with_snap_size(Some(0.0)).validate().is_err());
    }
}
