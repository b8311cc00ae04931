use crate::error::ConfigError;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// ===========================================================================
// ** LightConfig **
// ===========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LightConfig {
    pub min_cycle: Duration,
    pub max_cycle: Duration,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl LightConfig {
    pub const DEFAULT_MIN_CYCLE: Duration = Duration::from_secs(4);
    pub const DEFAULT_MAX_CYCLE: Duration = Duration::from_secs(6);
    pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        LightConfig {
            min_cycle: Self::DEFAULT_MIN_CYCLE,
            max_cycle: Self::DEFAULT_MAX_CYCLE,
            tick: Self::DEFAULT_TICK,
            seed: None,
        }
    }

    // -----------------------------------------------------------------------

    pub fn with_cycle(mut self, min_cycle: Duration, max_cycle: Duration) -> Self {
        self.min_cycle = min_cycle;
        self.max_cycle = max_cycle;
        self
    }

    // -----------------------------------------------------------------------
    // same as 'with_cycle' but from fractional seconds, as given on the CLI

    pub fn with_cycle_secs(self, min_secs: f64, max_secs: f64) -> Result<Self, ConfigError> {
        let min_cycle = seconds(min_secs)?;
        let max_cycle = seconds(max_secs)?;
        Ok(self.with_cycle(min_cycle, max_cycle))
    }

    // -----------------------------------------------------------------------

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_cycle.is_zero() || self.max_cycle.is_zero() {
            return Err(ConfigError::ZeroCycle {
                min: self.min_cycle,
                max: self.max_cycle,
            });
        }

        if self.min_cycle > self.max_cycle {
            return Err(ConfigError::InvertedCycle {
                min: self.min_cycle,
                max: self.max_cycle,
            });
        }

        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }

    // -----------------------------------------------------------------------

    pub(crate) fn cycle_timer(&self) -> CycleTimer {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        CycleTimer {
            rng,
            interval: Uniform::new_inclusive(
                self.min_cycle.as_secs_f64(),
                self.max_cycle.as_secs_f64(),
            ),
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        LightConfig::new()
    }
}

fn seconds(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidSeconds(secs))
}

// ===========================================================================
// ** CycleTimer **
// ===========================================================================

pub(crate) struct CycleTimer {
    rng: StdRng,
    interval: Uniform<f64>,
}

impl CycleTimer {
    pub(crate) fn next_cycle(&mut self) -> Duration {
        Duration::from_secs_f64(self.rng.sample(&self.interval))
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================
