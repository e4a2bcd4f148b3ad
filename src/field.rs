//! Field synthesis: densify the raw heat points into a continuous-looking field.
//!
//! Each raw point is joined to its nearest raw neighbour. Fill points are laid
//! along that segment at `2 * point_radius` spacing, and each one gets a heat
//! value summed from every raw source with an inverse-power falloff:
//!
//! ```text
//! heat(p) = base + Σ heat(s) / |p - s|^falloff
//! ```
//!
//! Synthesis is read-only with respect to the accumulator and rebuilds the
//! processed map from scratch on every call.

use glam::Vec3;

use crate::config::HeatMapConfig;
use crate::error::HeatMapError;
use crate::heatmap::HeatAccumulator;
use crate::point::ProcessedHeatMap;

/// Most fill points laid along one segment. Longer segments are left empty.
pub const MAX_SEGMENT_POINTS: usize = 1 << 16;

pub struct FieldSynthesizer {
    point_radius: f32,
    falloff_exponent: f32,
    base_heat: f32,
}

impl FieldSynthesizer {
    /// The config is taken as given; run `HeatMapConfig::validate` first.
    /// A non-positive radius only makes `points_between` skip every segment.
    pub fn new(config: &HeatMapConfig) -> Self {
        Self {
            point_radius: config.point_radius,
            falloff_exponent: config.falloff_exponent,
            base_heat: config.synthetic_base_heat,
        }
    }

    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    pub fn falloff_exponent(&self) -> f32 {
        self.falloff_exponent
    }

    /// Raw points plus interpolated fill between every point and its
    /// nearest neighbour. An empty accumulator yields an empty field.
    pub fn generate_processed_heat_map(
        &self,
        heatmap: &HeatAccumulator,
    ) -> Result<ProcessedHeatMap, HeatMapError> {
        let mut processed = heatmap.raw_map().clone();
        if processed.is_empty() {
            return Ok(processed);
        }

        let mut inserted = 0usize;
        for source in heatmap.iter() {
            let neighbour = heatmap.closest_heat_data(source.position)?;
            for point in self.points_between(source.position, neighbour.position) {
                self.add_point_in_processed_map(&mut processed, heatmap, point, self.base_heat);
                inserted += 1;
            }
        }

        log::debug!(
            "Synthesized field: {} raw + {} fill -> {} points",
            heatmap.len(),
            inserted,
            processed.len()
        );
        Ok(processed)
    }

    /// Evenly spaced points strictly between `from` and `to`.
    ///
    /// Segments no longer than `2 * point_radius` are already dense and get
    /// nothing. Longer ones get `ceil((d - 2r) / 2r)` points at
    /// `t = i / (n + 1)`, so neither endpoint is ever produced.
    ///
    /// A segment needing more than [`MAX_SEGMENT_POINTS`], or whose count is
    /// not finite (infinite distance, zero radius), is skipped and logged.
    pub fn points_between(&self, from: Vec3, to: Vec3) -> Vec<Vec3> {
        let spacing = 2.0 * self.point_radius;
        let distance = from.distance(to);
        if distance <= spacing {
            return Vec::new();
        }

        let count = ((distance - spacing) / spacing).ceil();
        if !count.is_finite() || count > MAX_SEGMENT_POINTS as f32 {
            log::warn!(
                "Not filling {} -> {}: {} points at spacing {}",
                from,
                to,
                count,
                spacing
            );
            return Vec::new();
        }
        let count = count as usize;
        let steps = (count + 1) as f32;
        (1..=count)
            .map(|i| from.lerp(to, i as f32 / steps))
            .collect()
    }

    /// Synthesize the heat at `point` and write it into `processed`,
    /// replacing whatever was stored there.
    pub fn add_point_in_processed_map(
        &self,
        processed: &mut ProcessedHeatMap,
        heatmap: &HeatAccumulator,
        point: Vec3,
        base_heat: f32,
    ) {
        let heat = self.synthesize_heat(heatmap, point, base_heat);
        processed.insert(point, heat);
    }

    /// `base_heat` plus the falloff-weighted contribution of every raw point.
    ///
    /// A source sitting exactly on `point` has no defined contribution and
    /// is skipped, as is any term that overflows to a non-finite value. A
    /// sum that overflows saturates at `f32::MAX` (or `f32::MIN`).
    pub fn synthesize_heat(&self, heatmap: &HeatAccumulator, point: Vec3, base_heat: f32) -> f32 {
        let mut heat = base_heat;
        for source in heatmap.iter() {
            let distance = point.distance(source.position);
            if distance <= 0.0 {
                log::trace!("Skipping coincident source at {}", source.position);
                continue;
            }
            let contribution = source.heat / distance.powf(self.falloff_exponent);
            if !contribution.is_finite() {
                log::debug!(
                    "Skipping non-finite contribution from {} at distance {}",
                    source.position,
                    distance
                );
                continue;
            }
            let sum = heat + contribution;
            if sum.is_finite() {
                heat = sum;
            } else {
                log::debug!("Heat at {} saturated adding {}", point, source.position);
                heat = sum.clamp(f32::MIN, f32::MAX);
            }
        }
        heat
    }
}
