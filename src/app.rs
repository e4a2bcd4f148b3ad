use gazeheat::stats::{EnginePhase, SessionStats};
use gazeheat::{
    FieldSynthesizer, FocusTracker, HeatAccumulator, HeatMapConfig, ProbeSet, SampleConfig, Vec3,
};

/// Focus events replayed when `--events` is not given.
const DEFAULT_EVENT_COUNT: usize = 2000;
/// Display refresh cadence, in focus events.
const DEFAULT_REFRESH_INTERVAL: usize = 100;
/// Focus events between summary log lines.
const SUMMARY_INTERVAL: usize = 500;
/// Points of interest the simulated viewer looks between.
const ATTRACTOR_COUNT: usize = 6;
/// Chance per event that gaze jumps to a different attractor.
const SWITCH_CHANCE: f32 = 0.08;
/// Gaze scatter around the attractor (world units, per axis).
const GAZE_SPREAD: f32 = 0.6;
/// Normalized heat at which a processed point counts as hot in refresh logs.
const HOT_FRACTION: f32 = 0.5;

/// Replay settings, from the command line or environment.
pub struct ReplayOptions {
    pub events: usize,
    pub refresh_interval: usize,
    pub seed: u64,
}

impl ReplayOptions {
    /// `--events <n>`, `--refresh <n>`, `--seed <n>` (or `GAZEHEAT_SEED`).
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut options = Self {
            events: DEFAULT_EVENT_COUNT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            seed: 0,
        };
        let mut seed = None;

        for i in 0..args.len() {
            let Some(value) = args.get(i + 1) else {
                continue;
            };
            match args[i].as_str() {
                "--events" | "-n" => match value.parse() {
                    Ok(n) => options.events = n,
                    Err(_) => log::warn!("Ignoring --events {:?}: not a number", value),
                },
                "--refresh" | "-r" => match value.parse::<usize>() {
                    Ok(n) if n > 0 => options.refresh_interval = n,
                    _ => log::warn!("Ignoring --refresh {:?}: not a positive number", value),
                },
                "--seed" | "-s" => match value.parse() {
                    Ok(n) => seed = Some(n),
                    Err(_) => log::warn!("Ignoring --seed {:?}: not a number", value),
                },
                _ => {}
            }
        }

        if seed.is_none() {
            if let Ok(raw) = std::env::var("GAZEHEAT_SEED") {
                match raw.parse() {
                    Ok(n) => {
                        log::info!("Using seed from environment: {}", n);
                        seed = Some(n);
                    }
                    Err(_) => log::warn!("Ignoring GAZEHEAT_SEED={:?}: not a number", raw),
                }
            }
        }

        options.seed = seed.unwrap_or_else(|| {
            let random_seed = fastrand::u64(..);
            log::info!("Using random seed: {}", random_seed);
            random_seed
        });
        options
    }
}

/// One simulated viewing session: a producer feeding focus hits and a
/// consumer refreshing the processed field at a fixed cadence.
struct Session {
    heatmap: HeatAccumulator,
    synthesizer: FieldSynthesizer,
    tracker: FocusTracker,
    probes: ProbeSet,
    stats: SessionStats,
    rng: fastrand::Rng,
    attractors: Vec<Vec3>,
    target: usize,
}

impl Session {
    fn new(heat_config: &HeatMapConfig, sample_config: &SampleConfig, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let attractors = (0..ATTRACTOR_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.f32() * 8.0 - 4.0,
                    rng.f32() * 2.0,
                    rng.f32() * 8.0 - 4.0,
                )
            })
            .collect();

        Self {
            heatmap: HeatAccumulator::new(heat_config),
            synthesizer: FieldSynthesizer::new(heat_config),
            tracker: FocusTracker::new(sample_config),
            probes: ProbeSet::new(sample_config.probe_min_heat),
            stats: SessionStats::new(),
            rng,
            attractors,
            target: 0,
        }
    }

    /// Next simulated focus hit: scattered around the current attractor.
    fn next_hit(&mut self) -> (Vec3, bool) {
        let switched = self.rng.f32() < SWITCH_CHANCE;
        if switched {
            self.target = self.rng.usize(..self.attractors.len());
        }
        // Sum of two uniforms: a cheap triangular scatter.
        let mut scatter = || (self.rng.f32() + self.rng.f32() - 1.0) * GAZE_SPREAD;
        let offset = Vec3::new(scatter(), scatter(), scatter());
        (self.attractors[self.target] + offset, switched)
    }

    fn producer_step(&mut self) {
        let (hit, switched) = self.next_hit();

        self.stats.timers.begin();
        let sample = self.tracker.observe(&mut self.heatmap, hit);
        self.stats.timers.end(EnginePhase::Focus);

        match sample {
            Some(sample) => {
                self.stats.samples_accepted += 1;
                self.stats.points_evicted += sample.cooldown.evicted as u64;
                if switched {
                    self.probes.register(sample.point);
                }
            }
            None => self.stats.samples_rejected += 1,
        }
    }

    /// Display refresh. A failed synthesis skips this refresh only.
    fn consumer_step(&mut self) {
        self.stats.timers.begin();
        let result = self.synthesizer.generate_processed_heat_map(&self.heatmap);
        self.stats.timers.end(EnginePhase::Synthesis);

        match result {
            Ok(field) => {
                self.stats.record_field(field.len());
                if let Some(max) = field.max_heat() {
                    let hot = field
                        .normalized()
                        .iter()
                        .filter(|p| p.heat >= HOT_FRACTION)
                        .count();
                    log::debug!(
                        "Field refreshed: {} points ({} hot), peak heat {:.2}",
                        field.len(),
                        hot,
                        max
                    );
                }
            }
            Err(e) => {
                self.stats.failed_syntheses += 1;
                log::warn!("Skipping field refresh: {e}");
            }
        }

        self.stats.timers.begin();
        let readings = self.probes.refresh(&self.heatmap);
        self.stats.timers.end(EnginePhase::Probes);
        for reading in &readings {
            log::trace!("Probe {} reads {:.3}", reading.position, reading.heat);
        }
    }
}

/// Entry point — validate config and replay a session.
pub fn run(options: &ReplayOptions) -> Result<(), Box<dyn std::error::Error>> {
    let heat_config = HeatMapConfig::from_env();
    heat_config.validate()?;
    let sample_config = SampleConfig::from_env();
    sample_config.validate()?;
    log::info!("Heat config: {:?}", heat_config);
    log::info!("Sample config: {:?}", sample_config);

    let mut session = Session::new(&heat_config, &sample_config, options.seed);
    log::info!(
        "Fill spacing {} (radius {}), falloff exponent {}",
        2.0 * session.synthesizer.point_radius(),
        session.synthesizer.point_radius(),
        session.synthesizer.falloff_exponent()
    );
    log::info!(
        "Replaying {} focus events (seed {}, refresh every {})",
        options.events,
        options.seed,
        options.refresh_interval
    );

    for event in 1..=options.events {
        session.producer_step();
        if event % options.refresh_interval == 0 {
            session.consumer_step();
        }
        if event % SUMMARY_INTERVAL == 0 {
            session.stats.log_summary(session.heatmap.len());
        }
    }

    session.consumer_step();
    session.stats.log_summary(session.heatmap.len());
    log::info!(
        "Session done: {} raw points, {} live probes",
        session.heatmap.len(),
        session.probes.len()
    );
    Ok(())
}
