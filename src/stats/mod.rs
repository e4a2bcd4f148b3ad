//! Session instrumentation: phase timings and recent synthesis sizes.

pub mod history;
pub mod timer;

pub use history::FieldHistory;
pub use timer::{EnginePhase, PhaseTimers};

/// Number of synthesis results kept for the rolling summary.
const FIELD_HISTORY_LEN: usize = 64;

/// Rolling statistics over one heat session.
pub struct SessionStats {
    pub timers: PhaseTimers,
    /// Processed point counts of recent syntheses.
    pub field_sizes: FieldHistory,
    pub samples_accepted: u64,
    pub samples_rejected: u64,
    pub syntheses: u64,
    pub failed_syntheses: u64,
    pub points_evicted: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            timers: PhaseTimers::new(),
            field_sizes: FieldHistory::new(FIELD_HISTORY_LEN),
            samples_accepted: 0,
            samples_rejected: 0,
            syntheses: 0,
            failed_syntheses: 0,
            points_evicted: 0,
        }
    }

    pub fn record_field(&mut self, size: usize) {
        self.syntheses += 1;
        self.field_sizes.record(size);
    }

    /// Mean processed field size over the recent window.
    pub fn mean_field_size(&self) -> f64 {
        self.field_sizes.mean()
    }

    /// Log a one-line summary at info level.
    pub fn log_summary(&self, raw_points: usize) {
        log::info!(
            "raw: {} | field: {} (avg {:.0}, peak {}) | samples: {} (+{} ignored) | evicted: {} | syntheses: {} ({} failed)",
            raw_points,
            self.field_sizes.latest().unwrap_or(0),
            self.mean_field_size(),
            self.field_sizes.peak().unwrap_or(0),
            self.samples_accepted,
            self.samples_rejected,
            self.points_evicted,
            self.syntheses,
            self.failed_syntheses,
        );
        for phase in EnginePhase::ALL {
            log::debug!("  {:<10} {:>8.1}us", phase.label(), self.timers.get(phase));
        }
        log::debug!("  {:<10} {:>8.1}us", "Total", self.timers.total_us());
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_field_size_over_window() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.mean_field_size(), 0.0);
        stats.record_field(10);
        stats.record_field(30);
        assert_eq!(stats.syntheses, 2);
        assert_eq!(stats.mean_field_size(), 20.0);
    }
}
