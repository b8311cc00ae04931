use std::fmt;
use std::io;
use std::time::Duration;

// ===========================================================================
// ** queue errors **
// ===========================================================================

// returned by 'send' on a closed queue, handing the value back
#[derive(PartialEq, Eq, thiserror::Error)]
#[error("sending on a closed queue")]
pub struct SendError<T>(pub T);

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecvTimeoutError {
    #[error("timed out waiting on queue")]
    Timeout,

    #[error("queue is closed and drained")]
    Closed,
}

// ===========================================================================
// ** light errors **
// ===========================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cycle bounds must be positive: min {min:?}, max {max:?}")]
    ZeroCycle { min: Duration, max: Duration },

    #[error("minimum cycle {min:?} exceeds maximum cycle {max:?}")]
    InvertedCycle { min: Duration, max: Duration },

    #[error("tick quantum must be positive")]
    ZeroTick,

    #[error("invalid cycle length {0} seconds")]
    InvalidSeconds(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum LightError {
    #[error("toggle loop is already running")]
    AlreadyRunning,

    #[error("toggle loop is not running")]
    NotRunning,

    #[error("light was stopped while waiting")]
    Stopped,

    #[error("timed out after {0:?} waiting for green")]
    Timeout(Duration),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn toggle thread: {0}")]
    Spawn(#[from] io::Error),
}
