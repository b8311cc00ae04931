mod config;
mod controller;
mod group;
mod phase;

pub use config::LightConfig;
pub use controller::PhaseController;
pub use group::LightGroup;
pub use phase::Phase;
