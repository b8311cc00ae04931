use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

// ===========================================================================
// ** Shutdown **
// ===========================================================================

// a one-shot stop signal; once raised it stays raised
pub struct Shutdown {
    condvar: Condvar,
    mutex: Mutex<bool>,
}

impl Shutdown {
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        Shutdown {
            condvar: Condvar::new(),
            mutex: Mutex::new(false),
        }
    }

    // -----------------------------------------------------------------------

    pub fn signal(&self) {
        let mut signaled = self.mutex.lock().unwrap();
        *signaled = true;
        self.condvar.notify_all();
    }

    // -----------------------------------------------------------------------

    pub fn is_signaled(&self) -> bool {
        *self.mutex.lock().unwrap()
    }

    // -----------------------------------------------------------------------
    // sleep for up to 'timeout'; returns 'true' as soon as the signal fires

    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut signaled = self.mutex.lock().unwrap();

        while !*signaled {
            let now = Instant::now();

            if now >= deadline {
                break;
            }

            let (guard, _) = self.condvar.wait_timeout(signaled, deadline - now).unwrap();
            signaled = guard;
        }

        *signaled
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Shutdown::new()
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    // -----------------------------------------------------------------------

    #[test]
    fn wait_timeout_elapses_unsignaled() {
        let shutdown = Shutdown::new();
        let started = Instant::now();
        assert!(!shutdown.wait_timeout(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    // -----------------------------------------------------------------------
    // a long wait is cut short by the signal

    #[test]
    fn signal_interrupts_wait() {
        let shutdown = Arc::new(Shutdown::new());
        let signaler = shutdown.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            signaler.signal();
        });

        let started = Instant::now();
        assert!(shutdown.wait_timeout(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    // -----------------------------------------------------------------------

    #[test]
    fn signal_is_sticky() {
        let shutdown = Shutdown::new();
        shutdown.signal();
        assert!(shutdown.is_signaled());
        assert!(shutdown.wait_timeout(Duration::ZERO));
    }
}
