use glam::Vec3;

use crate::heatmap::HeatAccumulator;
use crate::point::HeatPoint;

/// Registered coordinates whose raw heat is read back on every refresh.
///
/// A probe stays registered while its heat is at or above `min_heat`. Once
/// it reads colder it is reported one last time and then dropped.
pub struct ProbeSet {
    probes: Vec<Vec3>,
    min_heat: f32,
}

impl ProbeSet {
    pub fn new(min_heat: f32) -> Self {
        Self {
            probes: Vec::new(),
            min_heat,
        }
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn register(&mut self, point: Vec3) {
        self.probes.push(point);
    }

    /// Read every probe, then drop the ones that went cold.
    pub fn refresh(&mut self, heatmap: &HeatAccumulator) -> Vec<HeatPoint> {
        let readings: Vec<HeatPoint> = self
            .probes
            .iter()
            .map(|&p| HeatPoint::new(p, heatmap.heat_at_point(p)))
            .collect();

        let before = self.probes.len();
        let min_heat = self.min_heat;
        self.probes = readings
            .iter()
            .filter(|r| r.heat >= min_heat)
            .map(|r| r.position)
            .collect();
        if self.probes.len() < before {
            log::debug!("Dropped {} cold probes", before - self.probes.len());
        }
        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeatMapConfig;

    #[test]
    fn reports_all_then_drops_cold() {
        let mut acc = HeatAccumulator::new(&HeatMapConfig::default());
        acc.add_heat_to_point(Vec3::X, 1.0);
        acc.add_heat_to_point(Vec3::Y, 0.05);

        let mut probes = ProbeSet::new(0.1);
        probes.register(Vec3::X);
        probes.register(Vec3::Y);
        probes.register(Vec3::Z);

        let readings = probes.refresh(&acc);
        assert_eq!(
            readings,
            vec![
                HeatPoint::new(Vec3::X, 1.0),
                HeatPoint::new(Vec3::Y, 0.05),
                HeatPoint::new(Vec3::Z, 0.0),
            ]
        );
        assert_eq!(probes.len(), 1);
        assert_eq!(probes.refresh(&acc), vec![HeatPoint::new(Vec3::X, 1.0)]);
    }

    #[test]
    fn evicted_point_reads_cold() {
        let mut acc = HeatAccumulator::new(&HeatMapConfig::default().with_remove_cool_points(true));
        acc.add_heat_to_point(Vec3::ONE, 0.5);
        let mut probes = ProbeSet::new(0.1);
        probes.register(Vec3::ONE);

        acc.apply_cooldown(1.0);
        assert_eq!(probes.refresh(&acc)[0].heat, 0.0);
        assert!(probes.is_empty());
    }
}
