use crate::error::{LightError, RecvTimeoutError};
use crate::light::{LightConfig, Phase};
use crate::thread::{Broadcast, Shutdown, Subscription};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// ===========================================================================
// ** LightState **
// ===========================================================================

struct LightState {
    name: String,
    config: LightConfig,
    phase: Mutex<Phase>,
    updates: Broadcast<Phase>,
}

impl LightState {
    // -----------------------------------------------------------------------
    // the toggle loop: flip the phase whenever the drawn cycle has elapsed

    fn cycle_through_phases(&self, shutdown: &Shutdown) {
        let mut timer = self.config.cycle_timer();
        let mut cycle = timer.next_cycle();
        let mut last_update = Instant::now();

        while !shutdown.wait_timeout(self.config.tick) {
            if last_update.elapsed() < cycle {
                continue;
            }

            let phase = {
                let mut current = self.phase.lock().unwrap();
                *current = current.toggled();
                *current
            };

            let reached = self.updates.publish(phase);
            log::debug!(
                "{}: {} after {:.3}s ({} waiting)",
                self.name,
                phase,
                cycle.as_secs_f64(),
                reached
            );

            cycle = timer.next_cycle();
            last_update = Instant::now();
        }
    }
}

// ===========================================================================
// ** Worker **
// ===========================================================================

struct Worker {
    shutdown: Arc<Shutdown>,
    handle: thread::JoinHandle<()>,
}

// ===========================================================================
// ** PhaseController **
// ===========================================================================

pub struct PhaseController {
    state: Arc<LightState>,
    worker: Mutex<Option<Worker>>,
}

impl PhaseController {
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        PhaseController::build("light", LightConfig::default())
    }

    // -----------------------------------------------------------------------

    pub fn with_config(config: LightConfig) -> Result<Self, LightError> {
        PhaseController::named("light", config)
    }

    // -----------------------------------------------------------------------

    pub fn named(name: &str, config: LightConfig) -> Result<Self, LightError> {
        config.validate()?;
        Ok(PhaseController::build(name, config))
    }

    // -----------------------------------------------------------------------

    fn build(name: &str, config: LightConfig) -> Self {
        PhaseController {
            state: Arc::new(LightState {
                name: name.to_string(),
                config,
                phase: Mutex::new(Phase::Red),
                updates: Broadcast::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.state.name
    }

    // -----------------------------------------------------------------------

    pub fn config(&self) -> &LightConfig {
        &self.state.config
    }

    // -----------------------------------------------------------------------
    // spawn the toggle loop; a running light refuses a second start

    pub fn start(&self) -> Result<(), LightError> {
        let mut worker = self.worker.lock().unwrap();

        if worker.is_some() {
            log::warn!("{}: start called while already running", self.state.name);
            return Err(LightError::AlreadyRunning);
        }

        let shutdown = Arc::new(Shutdown::new());
        let state = self.state.clone();
        let stop = shutdown.clone();
        let handle = thread::Builder::new()
            .name(self.state.name.clone())
            .spawn(move || state.cycle_through_phases(&stop))?;

        *worker = Some(Worker { shutdown, handle });
        log::info!("{}: started at {}", self.state.name, self.current_phase());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // stop and join the toggle loop, releasing every waiter

    pub fn stop(&self) {
        let mut worker = self.worker.lock().unwrap();

        let Some(Worker { shutdown, handle }) = worker.take() else {
            return;
        };

        shutdown.signal();

        if handle.join().is_err() {
            log::error!("{}: toggle thread panicked", self.state.name);
        }

        self.state.updates.disconnect_all();
        log::info!("{}: stopped at {}", self.state.name, self.current_phase());
    }

    // -----------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.worker.lock().unwrap().is_some()
    }

    // -----------------------------------------------------------------------

    pub fn current_phase(&self) -> Phase {
        *self.state.phase.lock().unwrap()
    }

    // -----------------------------------------------------------------------

    pub fn is_green(&self) -> bool {
        self.current_phase().is_green()
    }

    // -----------------------------------------------------------------------
    // raw phase updates published from now on

    pub fn subscribe(&self) -> Subscription<Phase> {
        self.state.updates.subscribe()
    }

    // -----------------------------------------------------------------------
    // block until the light is green; returns at once if it already is

    pub fn wait_for_green(&self) -> Result<(), LightError> {
        let updates = self.subscribe();

        if !self.is_running() {
            return Err(LightError::NotRunning);
        }

        // subscribed first, so a green published after this read is queued
        if self.is_green() {
            return Ok(());
        }

        loop {
            match updates.receive() {
                Some(Phase::Green) => return Ok(()),
                Some(Phase::Red) => continue,
                None => return Err(LightError::Stopped),
            }
        }
    }

    // -----------------------------------------------------------------------

    pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<(), LightError> {
        let deadline = Instant::now() + timeout;
        let updates = self.subscribe();

        if !self.is_running() {
            return Err(LightError::NotRunning);
        }

        if self.is_green() {
            return Ok(());
        }

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());

            match updates.receive_timeout(remaining) {
                Ok(Phase::Green) => return Ok(()),
                Ok(Phase::Red) => continue,
                Err(RecvTimeoutError::Timeout) => return Err(LightError::Timeout(timeout)),
                Err(RecvTimeoutError::Closed) => return Err(LightError::Stopped),
            }
        }
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        PhaseController::new()
    }
}

impl Drop for PhaseController {
    fn drop(&mut self) {
        self.stop();
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================
