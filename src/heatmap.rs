//! Focus heatmap — accumulates heat at exact 3D points and cools it down.
//! Feeds the field synthesizer and any probes reading raw heat.

use glam::Vec3;

use crate::config::HeatMapConfig;
use crate::error::HeatMapError;
use crate::point::{HeatField, HeatPoint, PointKey, RawHeatMap};
use crate::spatial::SpatialHash;

/// Spatial index bucket table size.
const SPATIAL_TABLE_SIZE: usize = 1024;

/// Outcome of one cooldown sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownReport {
    /// Points whose heat reached zero or below.
    pub cooled: usize,
    /// Points actually removed (zero unless eviction is enabled).
    pub evicted: usize,
}

/// Raw point → heat mapping with additive growth and per-sample cooldown.
pub struct HeatAccumulator {
    raw: HeatField,
    /// Mirrors the key set of `raw`. `None` means linear-scan lookups.
    index: Option<SpatialHash>,
    remove_cool_points: bool,
    last_point: Option<Vec3>,
}

impl HeatAccumulator {
    /// The config is taken as given; run `HeatMapConfig::validate` first.
    /// A cell size that is not finite and positive falls back to linear scans.
    pub fn new(config: &HeatMapConfig) -> Self {
        let index = match config.spatial_cell_size {
            Some(cell_size) if cell_size.is_finite() && cell_size > 0.0 => {
                Some(SpatialHash::new(cell_size, SPATIAL_TABLE_SIZE))
            }
            Some(cell_size) => {
                log::warn!("Unusable spatial cell size {}, using linear scans", cell_size);
                None
            }
            None => None,
        };
        Self {
            raw: HeatField::new(),
            index,
            remove_cool_points: config.remove_cool_points,
            last_point: None,
        }
    }

    /// Read-only view of the raw point set.
    pub fn raw_map(&self) -> &RawHeatMap {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HeatPoint> + '_ {
        self.raw.iter()
    }

    pub fn remove_cool_points(&self) -> bool {
        self.remove_cool_points
    }

    pub fn set_remove_cool_points(&mut self, remove: bool) {
        self.remove_cool_points = remove;
    }

    /// Location passed to the most recent `add_heat_to_point`.
    pub fn last_point(&self) -> Option<Vec3> {
        self.last_point
    }

    pub fn clear(&mut self) {
        self.raw.points.clear();
        if let Some(index) = &mut self.index {
            index.clear();
        }
        self.last_point = None;
    }

    /// Add `value` to the heat at `point`, inserting the point if new.
    /// Heat is unbounded; repeated calls keep adding.
    pub fn add_heat_to_point(&mut self, point: Vec3, value: f32) {
        self.last_point = Some(point);
        let key = PointKey::new(point);
        match self.raw.points.get_mut(&key) {
            Some(heat) => *heat += value,
            None => {
                self.raw.points.insert(key, value);
                if let Some(index) = &mut self.index {
                    index.insert(key);
                }
                log::trace!("New heat point at {} ({})", point, value);
            }
        }
    }

    /// Subtract `amount` from every point.
    ///
    /// Positive results are always written back. Points that reach zero or
    /// below keep their previous heat and are only removed when eviction is
    /// enabled.
    pub fn apply_cooldown(&mut self, amount: f32) -> CooldownReport {
        let mut cool_points = Vec::new();
        for (&key, heat) in self.raw.points.iter_mut() {
            let cooled = *heat - amount;
            if cooled <= 0.0 {
                cool_points.push(key);
            } else {
                *heat = cooled;
            }
        }

        let mut report = CooldownReport {
            cooled: cool_points.len(),
            evicted: 0,
        };
        if !self.remove_cool_points {
            return report;
        }

        for key in cool_points {
            self.raw.points.remove(&key);
            if let Some(index) = &mut self.index {
                index.remove(key);
            }
            report.evicted += 1;
        }
        if report.evicted > 0 {
            log::debug!(
                "Cooldown evicted {} points, {} remain",
                report.evicted,
                self.raw.len()
            );
        }
        report
    }

    /// Heat stored at exactly `point`. Absent points are cold (0.0).
    pub fn heat_at_point(&self, point: Vec3) -> f32 {
        match self.raw.get(point) {
            Some(heat) => heat,
            None => {
                log::trace!("No heat at {}, reading 0", point);
                0.0
            }
        }
    }

    /// Closest stored point to `point`, excluding `point` itself.
    ///
    /// A map holding a single point returns that point even when it is the
    /// query. Fails only on an empty map.
    pub fn closest_heat_data(&self, point: Vec3) -> Result<HeatPoint, HeatMapError> {
        match self.raw.len() {
            0 => return Err(HeatMapError::EmptyMap),
            1 => {
                if let Some(only) = self.raw.iter().next() {
                    return Ok(only);
                }
            }
            _ => {}
        }

        let exclude = PointKey::new(point);
        let hit = self
            .index
            .as_ref()
            .and_then(|index| index.nearest(point, Some(exclude)))
            .map(|(key, _)| key)
            .or_else(|| self.closest_linear(point, exclude));

        // With two or more unique keys, at least one differs from `exclude`.
        let key = hit.ok_or(HeatMapError::EmptyMap)?;
        let heat = self.raw.points.get(&key).copied().unwrap_or(0.0);
        Ok(HeatPoint::new(key.to_vec3(), heat))
    }

    fn closest_linear(&self, point: Vec3, exclude: PointKey) -> Option<PointKey> {
        let mut min_distance = f32::INFINITY;
        let mut closest = None;
        for &key in self.raw.points.keys() {
            if key == exclude {
                continue;
            }
            // NaN coordinates rank behind every real distance.
            let distance = key.to_vec3().distance(point);
            let distance = if distance.is_nan() { f32::INFINITY } else { distance };
            if closest.is_none() || distance < min_distance {
                min_distance = distance;
                closest = Some(key);
            }
        }
        closest
    }
}
