use crate::error::RecvTimeoutError;
use crate::thread::BlockingQueue;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

// ===========================================================================
// ** Subscription **
// ===========================================================================

// sees every value published after it was created, in publish order
pub struct Subscription<T> {
    queue: Arc<BlockingQueue<T>>,
}

impl<T> Subscription<T> {
    // -----------------------------------------------------------------------

    pub fn receive(&self) -> Option<T> {
        self.queue.receive()
    }

    // -----------------------------------------------------------------------

    pub fn receive_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.queue.receive_timeout(timeout)
    }

    // -----------------------------------------------------------------------

    pub fn try_receive(&self) -> Option<T> {
        self.queue.try_receive()
    }

    // -----------------------------------------------------------------------

    pub fn is_disconnected(&self) -> bool {
        self.queue.is_closed()
    }
}

// ===========================================================================
// ** Broadcast **
// ===========================================================================

pub struct Broadcast<T: Clone> {
    subscribers: Mutex<Vec<Weak<BlockingQueue<T>>>>,
}

impl<T: Clone> Broadcast<T> {
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        Broadcast {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    // -----------------------------------------------------------------------

    pub fn subscribe(&self) -> Subscription<T> {
        let queue = Arc::new(BlockingQueue::new());
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|weak| weak.strong_count() > 0);
        subscribers.push(Arc::downgrade(&queue));
        Subscription { queue }
    }

    // -----------------------------------------------------------------------
    // returns the number of subscribers that received 'value'

    pub fn publish(&self, value: T) -> usize {
        let mut subscribers = self.subscribers.lock().unwrap();
        let before = subscribers.len();
        let mut reached = 0;

        subscribers.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                if queue.send(value.clone()).is_ok() {
                    reached += 1;
                }

                true
            }
            None => false,
        });

        if subscribers.len() < before {
            log::trace!("pruned {} dropped subscribers", before - subscribers.len());
        }

        reached
    }

    // -----------------------------------------------------------------------

    pub fn subscriber_count(&self) -> usize {
        let subscribers = self.subscribers.lock().unwrap();
        subscribers.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    // -----------------------------------------------------------------------
    // registered entries, including dropped ones not yet pruned

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    // -----------------------------------------------------------------------
    // close every current subscription; later subscribers start fresh

    pub fn disconnect_all(&self) {
        let mut subscribers = self.subscribers.lock().unwrap();

        for weak in subscribers.drain(..) {
            if let Some(queue) = weak.upgrade() {
                queue.close();
            }
        }
    }
}

impl<T: Clone> Default for Broadcast<T> {
    fn default() -> Self {
        Broadcast::new()
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================
