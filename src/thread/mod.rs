mod atomic;
mod broadcast;
mod queue;
mod signal;

pub use atomic::Counter;
pub use broadcast::{Broadcast, Subscription};
pub use queue::{BlockingQueue, Removal};
pub use signal::Shutdown;
