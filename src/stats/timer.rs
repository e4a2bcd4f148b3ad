use instant::Instant;

/// Which part of the engine is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EnginePhase {
    Focus = 0,
    Synthesis = 1,
    Probes = 2,
}

impl EnginePhase {
    pub const ALL: [EnginePhase; 3] = [Self::Focus, Self::Synthesis, Self::Probes];

    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Synthesis => "Synthesis",
            Self::Probes => "Probes",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct PhaseTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 3],
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 3],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: EnginePhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: EnginePhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    pub fn get(&self, phase: EnginePhase) -> f64 {
        self.durations_us[phase as usize]
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }
}

impl Default for PhaseTimers {
    fn default() -> Self {
        Self::new()
    }
}
