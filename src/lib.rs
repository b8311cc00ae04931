pub mod error;
pub mod light;
pub mod thread;

pub use error::{ConfigError, LightError, RecvTimeoutError, SendError};
pub use light::{LightConfig, LightGroup, Phase, PhaseController};
