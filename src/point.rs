use std::collections::HashMap;

use glam::Vec3;

/// Exact-equality map key for a 3D point.
///
/// Built from the raw bit pattern of each component, so two points only
/// share a key when their coordinates are bit-identical. The one exception
/// is zero: `-0.0` and `+0.0` compare equal as floats and share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u32; 3]);

impl PointKey {
    pub fn new(point: Vec3) -> Self {
        Self([canonical_bits(point.x), canonical_bits(point.y), canonical_bits(point.z)])
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(
            f32::from_bits(self.0[0]),
            f32::from_bits(self.0[1]),
            f32::from_bits(self.0[2]),
        )
    }
}

impl From<Vec3> for PointKey {
    fn from(point: Vec3) -> Self {
        Self::new(point)
    }
}

fn canonical_bits(v: f32) -> u32 {
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

/// A point and the heat stored at it. Returned by queries, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub position: Vec3,
    pub heat: f32,
}

impl HeatPoint {
    pub fn new(position: Vec3, heat: f32) -> Self {
        Self { position, heat }
    }
}

/// Mapping from 3D point to heat.
///
/// Used both for the accumulator's raw samples and for the synthesized
/// field handed to consumers. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatField {
    pub(crate) points: HashMap<PointKey, f32>,
}

/// Heat contributed directly by the sample producer.
pub type RawHeatMap = HeatField;
/// Raw heat plus interpolated fill points, rebuilt on every synthesis.
pub type ProcessedHeatMap = HeatField;

impl HeatField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, point: Vec3) -> Option<f32> {
        self.points.get(&PointKey::new(point)).copied()
    }

    /// Heat at `point`, or 0.0 if the point is absent.
    pub fn heat_at(&self, point: Vec3) -> f32 {
        self.get(point).unwrap_or(0.0)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.points.contains_key(&PointKey::new(point))
    }

    /// Set the heat at `point`, returning the value it replaced.
    pub fn insert(&mut self, point: Vec3, heat: f32) -> Option<f32> {
        self.points.insert(PointKey::new(point), heat)
    }

    pub fn remove(&mut self, point: Vec3) -> Option<f32> {
        self.points.remove(&PointKey::new(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = HeatPoint> + '_ {
        self.points
            .iter()
            .map(|(key, &heat)| HeatPoint::new(key.to_vec3(), heat))
    }

    /// Largest stored heat, or `None` for an empty field.
    pub fn max_heat(&self) -> Option<f32> {
        self.points.values().copied().reduce(f32::max)
    }

    /// Every point with its heat scaled into [0, 1] by the field maximum.
    /// Fields with no positive heat map to all zeros.
    pub fn normalized(&self) -> Vec<HeatPoint> {
        let max = self.max_heat().unwrap_or(0.0);
        let inv = if max > 0.0 { 1.0 / max } else { 0.0 };
        self.iter()
            .map(|p| HeatPoint::new(p.position, (p.heat * inv).clamp(0.0, 1.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_position() {
        let p = Vec3::new(1.25, -3.5, 0.1);
        assert_eq!(PointKey::new(p).to_vec3(), p);
    }

    #[test]
    fn signed_zero_shares_a_key() {
        assert_eq!(
            PointKey::new(Vec3::new(-0.0, 0.0, 1.0)),
            PointKey::new(Vec3::new(0.0, -0.0, 1.0))
        );
    }

    #[test]
    fn nearby_points_are_distinct_keys() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(1.0 + f32::EPSILON, 1.0, 1.0);
        assert_ne!(PointKey::new(a), PointKey::new(b));
    }

    #[test]
    fn heat_at_missing_point_is_zero() {
        let mut field = HeatField::new();
        field.insert(Vec3::ONE, 2.0);
        assert_eq!(field.heat_at(Vec3::ZERO), 0.0);
        assert_eq!(field.heat_at(Vec3::ONE), 2.0);
    }

    #[test]
    fn insert_overwrites() {
        let mut field = HeatField::new();
        assert_eq!(field.insert(Vec3::X, 1.0), None);
        assert_eq!(field.insert(Vec3::X, 3.0), Some(1.0));
        assert_eq!(field.len(), 1);
        assert_eq!(field.get(Vec3::X), Some(3.0));
        assert_eq!(field.remove(Vec3::X), Some(3.0));
        assert!(field.is_empty());
    }

    #[test]
    fn normalized_scales_by_max() {
        let mut field = HeatField::new();
        field.insert(Vec3::X, 2.0);
        field.insert(Vec3::Y, 8.0);
        let mut scaled: Vec<f32> = field.normalized().iter().map(|p| p.heat).collect();
        scaled.sort_by(f32::total_cmp);
        assert_eq!(scaled, vec![0.25, 1.0]);
    }

    #[test]
    fn normalized_cold_field_is_zero() {
        let mut field = HeatField::new();
        field.insert(Vec3::X, -1.0);
        assert!(field.normalized().iter().all(|p| p.heat == 0.0));
        assert_eq!(HeatField::new().max_heat(), None);
    }
}
