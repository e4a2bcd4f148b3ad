use glam::Vec3;

use crate::config::SampleConfig;
use crate::heatmap::{CooldownReport, HeatAccumulator};

/// A focus hit that was turned into a heat sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusSample {
    /// Point the heat was added at (after snapping).
    pub point: Vec3,
    pub cooldown: CooldownReport,
}

/// Turns a stream of focus hits into heat samples.
///
/// A hit only counts once focus has moved at least `focus_shift_threshold`
/// from the last accepted hit; small jitter around one spot is ignored.
/// Each accepted hit adds `heat_increment` at the (optionally snapped) point
/// and then cools the whole map by `cooldown`.
pub struct FocusTracker {
    heat_increment: f32,
    cooldown: f32,
    shift_threshold: f32,
    snap_size: Option<f32>,
    last_focus: Option<Vec3>,
    accepted: u64,
    rejected: u64,
}

impl FocusTracker {
    pub fn new(config: &SampleConfig) -> Self {
        Self {
            heat_increment: config.heat_increment,
            cooldown: config.cooldown,
            shift_threshold: config.focus_shift_threshold,
            snap_size: config.snap_size,
            last_focus: None,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Last accepted focus hit, before snapping.
    pub fn last_focus(&self) -> Option<Vec3> {
        self.last_focus
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Feed one focus hit. Returns the sample if the hit was accepted.
    pub fn observe(&mut self, heatmap: &mut HeatAccumulator, hit: Vec3) -> Option<FocusSample> {
        if let Some(last) = self.last_focus {
            if hit.distance(last) < self.shift_threshold {
                self.rejected += 1;
                return None;
            }
        }
        self.last_focus = Some(hit);
        self.accepted += 1;

        let point = self.snap(hit);
        heatmap.add_heat_to_point(point, self.heat_increment);
        let cooldown = heatmap.apply_cooldown(self.cooldown);
        log::trace!("Focus sample at {} (heat {})", point, heatmap.heat_at_point(point));
        Some(FocusSample { point, cooldown })
    }

    /// Forget the last focus point so the next hit is always accepted.
    pub fn reset(&mut self) {
        self.last_focus = None;
    }

    fn snap(&self, point: Vec3) -> Vec3 {
        match self.snap_size {
            Some(size) => (point / size).round() * size,
            None => point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeatMapConfig;

    fn setup(config: SampleConfig) -> (FocusTracker, HeatAccumulator) {
        (
            FocusTracker::new(&config),
            HeatAccumulator::new(&HeatMapConfig::default()),
        )
    }

    #[test]
    fn first_hit_is_accepted() {
        let (mut tracker, mut acc) = setup(SampleConfig::default());
        let sample = tracker.observe(&mut acc, Vec3::ZERO).unwrap();
        assert_eq!(sample.point, Vec3::ZERO);
        assert!((acc.heat_at_point(Vec3::ZERO) - (1.1 - 0.007)).abs() < 1e-6);
    }

    #[test]
    fn jitter_below_threshold_is_ignored() {
        let (mut tracker, mut acc) = setup(SampleConfig::default());
        tracker.observe(&mut acc, Vec3::ZERO);
        assert!(tracker.observe(&mut acc, Vec3::new(0.1, 0.1, 0.0)).is_none());
        assert_eq!(acc.len(), 1);
        assert_eq!(tracker.rejected(), 1);

        assert!(tracker.observe(&mut acc, Vec3::new(0.3, 0.0, 0.0)).is_some());
        assert_eq!(acc.len(), 2);
        assert_eq!(tracker.accepted(), 2);
    }

    #[test]
    fn threshold_is_measured_from_last_accepted_hit() {
        let (mut tracker, mut acc) = setup(SampleConfig::default());
        tracker.observe(&mut acc, Vec3::ZERO);
        // Creep in small steps; none reach 0.25 from the origin until the third.
        assert!(tracker.observe(&mut acc, Vec3::new(0.1, 0.0, 0.0)).is_none());
        assert!(tracker.observe(&mut acc, Vec3::new(0.2, 0.0, 0.0)).is_none());
        assert!(tracker.observe(&mut acc, Vec3::new(0.3, 0.0, 0.0)).is_some());
        assert_eq!(tracker.last_focus(), Some(Vec3::new(0.3, 0.0, 0.0)));
    }

    #[test]
    fn snapping_merges_nearby_revisits() {
        let config = SampleConfig::default().with_snap_size(Some(0.5));
        let (mut tracker, mut acc) = setup(config);
        tracker.observe(&mut acc, Vec3::new(0.9, 0.0, 0.0));
        tracker.observe(&mut acc, Vec3::new(3.0, 0.0, 0.0));
        tracker.observe(&mut acc, Vec3::new(1.1, 0.0, 0.0));

        assert_eq!(acc.len(), 2);
        assert!(acc.heat_at_point(Vec3::new(1.0, 0.0, 0.0)) > 2.0);
    }

    #[test]
    fn reset_accepts_next_hit() {
        let (mut tracker, mut acc) = setup(SampleConfig::default());
        tracker.observe(&mut acc, Vec3::ZERO);
        tracker.reset();
        assert!(tracker.observe(&mut acc, Vec3::new(0.01, 0.0, 0.0)).is_some());
    }
}
