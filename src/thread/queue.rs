use crate::error::{RecvTimeoutError, SendError};
use crate::thread::Counter;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

// ===========================================================================
// ** Removal **
// ===========================================================================

// 'Lifo' only preserves publish order while at most one value is pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Removal {
    #[default]
    Fifo,
    Lifo,
}

// ===========================================================================
// ** QueueState **
// ===========================================================================

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

impl<T> QueueState<T> {
    fn pop(&mut self, removal: Removal) -> Option<T> {
        match removal {
            Removal::Fifo => self.items.pop_front(),
            Removal::Lifo => self.items.pop_back(),
        }
    }
}

// ===========================================================================
// ** BlockingQueue **
// ===========================================================================

pub struct BlockingQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    removal: Removal,
    sent: Counter,
    received: Counter,
}

impl<T> BlockingQueue<T> {
    // -----------------------------------------------------------------------

    pub fn new() -> Self {
        BlockingQueue::with_removal(Removal::Fifo)
    }

    // -----------------------------------------------------------------------

    pub fn with_removal(removal: Removal) -> Self {
        BlockingQueue {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            removal,
            sent: Counter::new(),
            received: Counter::new(),
        }
    }

    // -----------------------------------------------------------------------

    pub fn removal(&self) -> Removal {
        self.removal
    }

    // -----------------------------------------------------------------------
    // append 'value' and wake one blocked receiver

    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut state = self.state.lock().unwrap();

        if state.closed {
            return Err(SendError(value));
        }

        state.items.push_back(value);
        self.sent.increment();
        self.not_empty.notify_one();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // blocks until a value is available; 'None' once closed and drained

    pub fn receive(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(value) = self.take(&mut state) {
                return Some(value);
            }

            if state.closed {
                return None;
            }

            state = self.not_empty.wait(state).unwrap();
        }
    }

    // -----------------------------------------------------------------------

    pub fn receive_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(value) = self.take(&mut state) {
                return Ok(value);
            }

            if state.closed {
                return Err(RecvTimeoutError::Closed);
            }

            let now = Instant::now();

            if now >= deadline {
                return Err(RecvTimeoutError::Timeout);
            }

            let (guard, _) = self.not_empty.wait_timeout(state, deadline - now).unwrap();
            state = guard;
        }
    }

    // -----------------------------------------------------------------------

    pub fn try_receive(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        self.take(&mut state)
    }

    // -----------------------------------------------------------------------
    // refuse further sends and release every blocked receiver

    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();

        if !state.closed {
            state.closed = true;
            log::trace!("queue closed with {} pending", state.items.len());
        }

        self.not_empty.notify_all();
    }

    // -----------------------------------------------------------------------

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }

    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    // -----------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // (sent, received) totals since creation

    pub fn stats(&self) -> (u64, u64) {
        (self.sent.get(), self.received.get())
    }

    // -----------------------------------------------------------------------

    fn take(&self, state: &mut MutexGuard<'_, QueueState<T>>) -> Option<T> {
        let value = state.pop(self.removal);

        if value.is_some() {
            self.received.increment();
        }

        value
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        BlockingQueue::new()
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    // -----------------------------------------------------------------------

    #[test]
    fn send_then_receive() {
        let queue = BlockingQueue::new();
        queue.send(String::from("green")).unwrap();
        assert_eq!(queue.receive().as_deref(), Some("green"));
        assert!(queue.is_empty());
        assert_eq!(queue.stats(), (1, 1));
    }

    // -----------------------------------------------------------------------
    // a receiver parked on an empty queue wakes on send

    #[test]
    fn receive_blocks_until_send() {
        let queue = Arc::new(BlockingQueue::new());
        let producer = queue.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            producer.send(42).unwrap();
        });

        let started = Instant::now();
        assert_eq!(queue.receive(), Some(42));
        assert!(started.elapsed() >= Duration::from_millis(90));
        handle.join().unwrap();
    }

    // -----------------------------------------------------------------------

    #[test]
    fn fifo_preserves_order() {
        let queue = BlockingQueue::new();
        queue.send(1).unwrap();
        queue.send(2).unwrap();
        assert_eq!(queue.receive(), Some(1));
        assert_eq!(queue.receive(), Some(2));
    }

    // -----------------------------------------------------------------------

    #[test]
    fn lifo_takes_newest() {
        let queue = BlockingQueue::with_removal(Removal::Lifo);
        queue.send(1).unwrap();
        queue.send(2).unwrap();
        assert_eq!(queue.receive(), Some(2));
        assert_eq!(queue.receive(), Some(1));
    }

    // -----------------------------------------------------------------------

    #[test]
    fn receive_timeout_expires() {
        let queue = BlockingQueue::<u32>::new();
        let started = Instant::now();
        let result = queue.receive_timeout(Duration::from_millis(50));
        assert_eq!(result, Err(RecvTimeoutError::Timeout));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    // -----------------------------------------------------------------------

    #[test]
    fn receive_timeout_returns_pending_value() {
        let queue = BlockingQueue::new();
        queue.send(7).unwrap();
        assert_eq!(queue.receive_timeout(Duration::from_millis(10)), Ok(7));
    }

    // -----------------------------------------------------------------------
    // close releases blocked receivers but pending values survive

    #[test]
    fn close_drains_then_ends() {
        let queue = Arc::new(BlockingQueue::new());
        queue.send(1).unwrap();
        queue.close();

        assert_eq!(queue.send(2), Err(SendError(2)));
        assert_eq!(queue.receive(), Some(1));
        assert_eq!(queue.receive(), None);
        assert_eq!(
            queue.receive_timeout(Duration::from_millis(10)),
            Err(RecvTimeoutError::Closed)
        );
    }

    // -----------------------------------------------------------------------

    #[test]
    fn close_wakes_all_receivers() {
        let queue = Arc::new(BlockingQueue::<u32>::new());
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || queue.receive())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.close();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), None);
        }
    }

    // -----------------------------------------------------------------------

    #[test]
    fn try_receive_does_not_block() {
        let queue = BlockingQueue::new();
        assert_eq!(queue.try_receive(), None);
        queue.send('r').unwrap();
        assert_eq!(queue.try_receive(), Some('r'));
    }

    // -----------------------------------------------------------------------
    // every value sent by one producer reaches exactly one of many consumers

    #[test]
    fn many_consumers_share_values() {
        let queue = Arc::new(BlockingQueue::new());
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || {
                    let mut total = 0u64;

                    while let Some(value) = queue.receive() {
                        total += value;
                    }

                    total
                })
            })
            .collect();

        for value in 1..=100u64 {
            queue.send(value).unwrap();
        }

        queue.close();
        let total: u64 = consumers.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 5050);
        assert_eq!(queue.stats(), (100, 100));
    }

    proptest! {
        #[test]
        fn fifo_matches_send_order(values in proptest::collection::vec(any::<i32>(), 0..64)) {
            let queue = BlockingQueue::new();

            for value in &values {
                queue.send(*value).unwrap();
            }

            let received: Vec<i32> = std::iter::from_fn(|| queue.try_receive()).collect();
            prop_assert_eq!(received, values);
        }

        #[test]
        fn lifo_reverses_send_order(values in proptest::collection::vec(any::<i32>(), 0..64)) {
            let queue = BlockingQueue::with_removal(Removal::Lifo);

            for value in &values {
                queue.send(*value).unwrap();
            }

            let received: Vec<i32> = std::iter::from_fn(|| queue.try_receive()).collect();
            let expected: Vec<i32> = values.into_iter().rev().collect();
            prop_assert_eq!(received, expected);
        }
    }
}
