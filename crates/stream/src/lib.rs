//! Cross-thread event delivery primitives for the `sift` pipeline.
//!
//! Two container types cover the two multicast behaviours the pipeline
//! needs. [`Broadcast`] is a transient source: a notified value fans out to
//! the observers attached at that moment and is never replayed, so a late
//! observer starts with a blank slate. [`Latest`] is a replay-one cell: it
//! always holds a current value and hands it to every new subscriber
//! immediately, then streams each subsequent publish.
//!
//! Both assume a single producer thread performs all mutations; observers
//! on other threads only ever read from their channel endpoints.
//!
//! ```
//! use sift_stream::{Broadcast, Latest};
//!
//! let source: Broadcast<String> = Broadcast::new();
//! let queries = source.subscribe();
//! source.notify(&"apple".to_string());
//! assert_eq!(queries.recv().unwrap(), "apple");
//!
//! let cell = Latest::new(0u32);
//! cell.publish(7);
//! let late = cell.subscribe();
//! assert_eq!(late.recv().unwrap(), 7);
//! ```

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// Callback attached to a [`Broadcast`] source.
///
/// Returning `false` detaches the observer.
type Observer<T> = Box<dyn FnMut(&T) -> bool + Send>;

/// Multicast event source without replay.
///
/// A value is delivered to the observers attached at notify time; nothing
/// is buffered, so a value notified before an observer attaches is never
/// seen by it.
pub struct Broadcast<T> {
    inner: Mutex<BroadcastInner<T>>,
}

struct BroadcastInner<T> {
    observers: Vec<Observer<T>>,
    closed: bool,
}

impl<T> Broadcast<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BroadcastInner {
                observers: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Attach a callback observer.
    ///
    /// The callback runs on the notifying thread for every subsequent
    /// value; returning `false` detaches it. Observing a closed source is a
    /// no-op.
    pub fn observe(&self, observer: impl FnMut(&T) -> bool + Send + 'static) {
        let mut inner = self.inner.lock().expect("broadcast state poisoned");
        if inner.closed {
            return;
        }
        inner.observers.push(Box::new(observer));
    }

    /// Deliver `value` to every observer attached right now.
    ///
    /// Notifying a closed source is a no-op.
    pub fn notify(&self, value: &T) {
        let mut inner = self.inner.lock().expect("broadcast state poisoned");
        if inner.closed {
            return;
        }
        inner.observers.retain_mut(|observer| observer(value));
    }

    /// Detach all observers and refuse further notifications.
    pub fn close(&self) {
        let mut inner = self.inner.lock().expect("broadcast state poisoned");
        inner.closed = true;
        inner.observers.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().expect("broadcast state poisoned").closed
    }

    #[cfg(test)]
    fn observer_count(&self) -> usize {
        self.inner
            .lock()
            .expect("broadcast state poisoned")
            .observers
            .len()
    }
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    /// Attach a channel-backed observer and return its receiving end.
    ///
    /// The observer detaches itself once the receiver is dropped. A
    /// subscription taken from a closed source disconnects immediately.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.observe(move |value: &T| tx.send(value.clone()).is_ok());
        rx
    }
}

impl<T> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Replay-one broadcast cell.
///
/// The cell holds a current value from birth. Subscribers receive that
/// value immediately, then every subsequent publish, until the cell is
/// closed and their streams terminate.
pub struct Latest<T> {
    inner: Mutex<LatestInner<T>>,
}

struct LatestInner<T> {
    current: T,
    subscribers: Vec<Sender<T>>,
    closed: bool,
}

impl<T: Clone> Latest<T> {
    #[must_use]
    pub fn new(seed: T) -> Self {
        Self {
            inner: Mutex::new(LatestInner {
                current: seed,
                subscribers: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Store `value` as the current value and fan it out to live
    /// subscribers.
    ///
    /// Publishing to a closed cell is a no-op.
    pub fn publish(&self, value: T) {
        let mut inner = self.inner.lock().expect("latest cell poisoned");
        if inner.closed {
            return;
        }
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
        inner.current = value;
    }

    /// Snapshot the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner
            .lock()
            .expect("latest cell poisoned")
            .current
            .clone()
    }

    /// Subscribe to the cell, receiving the current value immediately.
    ///
    /// A subscription taken from a closed cell still yields the final value
    /// before disconnecting.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.inner.lock().expect("latest cell poisoned");
        let _ = tx.send(inner.current.clone());
        if !inner.closed {
            inner.subscribers.push(tx);
        }
        rx
    }

    /// Close the cell, dropping all subscriber channels so their streams
    /// terminate after draining.
    pub fn close(&self) {
        let mut inner = self.inner.lock().expect("latest cell poisoned");
        inner.closed = true;
        inner.subscribers.clear();
    }
}
