//! Mutex/condvar bounded queue built on the ring storage.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::cancel::{CancelToken, Interrupt};
use crate::config::QueueConfig;
use crate::error::{GetError, PutError, QueueError};
use crate::ring::Ring;

struct Shared<T> {
    ring: Mutex<Ring<T>>,
    /// Signalled when a slot is freed.
    not_full: Condvar,
    /// Signalled when an element is stored.
    not_empty: Condvar,
    capacity: usize,
    label: String,
}

impl<T: Send> Interrupt for Shared<T> {
    fn interrupt(&self) {
        // Waiters test their token under this lock, so none can miss the broadcast.
        drop(self.ring.lock());
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }
}

/// A fixed-capacity FIFO that blocks producers while full and consumers while
/// empty.
///
/// The handle is cheap to clone; clones share the same ring. Every completed
/// `put` wakes at most one waiting consumer and every completed `get` at most
/// one waiting producer.
pub struct BoundedBlockingQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BoundedBlockingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> BoundedBlockingQueue<T> {
    /// Creates a queue holding at most `capacity` elements.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        Self::with_config(&QueueConfig::new(capacity))
    }

    pub fn with_config(config: &QueueConfig) -> Result<Self, QueueError> {
        config.validate()?;
        tracing::debug!(
            label = %config.label,
            capacity = config.capacity,
            "created bounded blocking queue"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                ring: Mutex::new(Ring::new(config.capacity)),
                not_full: Condvar::new(),
                not_empty: Condvar::new(),
                capacity: config.capacity,
                label: config.label.clone(),
            }),
        })
    }

    /// Inserts `value`, waiting for as long as the queue stays full.
    pub fn put(&self, mut value: T) {
        let mut ring = self.shared.ring.lock();
        loop {
            match ring.push(value) {
                Ok(()) => break,
                Err(rejected) => value = rejected,
            }
            self.shared.not_full.wait(&mut ring);
        }
        self.shared.not_empty.notify_one();
    }

    /// Removes the oldest element, waiting for as long as the queue stays empty.
    pub fn get(&self) -> T {
        let mut ring = self.shared.ring.lock();
        loop {
            if let Some(value) = ring.pop() {
                self.shared.not_full.notify_one();
                return value;
            }
            self.shared.not_empty.wait(&mut ring);
        }
    }

    /// Inserts `value` only if a slot is free right now.
    pub fn try_put(&self, value: T) -> Result<(), PutError<T>> {
        let mut ring = self.shared.ring.lock();
        ring.push(value).map_err(PutError::Full)?;
        self.shared.not_empty.notify_one();
        Ok(())
    }

    /// Removes the oldest element only if one is present right now.
    pub fn try_get(&self) -> Result<T, GetError> {
        let mut ring = self.shared.ring.lock();
        let value = ring.pop().ok_or(GetError::Empty)?;
        self.shared.not_full.notify_one();
        Ok(value)
    }

    pub fn put_timeout(&self, value: T, timeout: Duration) -> Result<(), PutError<T>> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.put_deadline(value, deadline),
            None => {
                self.put(value);
                Ok(())
            }
        }
    }

    /// Inserts `value`, giving up with [`PutError::TimedOut`] once `deadline`
    /// passes with the queue still full.
    pub fn put_deadline(&self, value: T, deadline: Instant) -> Result<(), PutError<T>> {
        self.put_inner(value, None, Some(deadline))
    }

    pub fn get_timeout(&self, timeout: Duration) -> Result<T, GetError> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.get_deadline(deadline),
            None => Ok(self.get()),
        }
    }

    /// Removes the oldest element, giving up with [`GetError::TimedOut`] once
    /// `deadline` passes with the queue still empty.
    pub fn get_deadline(&self, deadline: Instant) -> Result<T, GetError> {
        self.get_inner(None, Some(deadline))
    }

    /// Number of elements held at the instant of the call.
    pub fn len(&self) -> usize {
        self.shared.ring.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.ring.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.shared.ring.lock().is_full()
    }

    /// Free slots at the instant of the call.
    pub fn remaining(&self) -> usize {
        let ring = self.shared.ring.lock();
        ring.capacity() - ring.len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn label(&self) -> &str {
        &self.shared.label
    }

    fn put_inner(
        &self,
        mut value: T,
        cancel: Option<&CancelToken>,
        deadline: Option<Instant>,
    ) -> Result<(), PutError<T>> {
        let mut ring = self.shared.ring.lock();
        loop {
            value = match ring.push(value) {
                Ok(()) => {
                    self.shared.not_empty.notify_one();
                    return Ok(());
                }
                Err(rejected) => rejected,
            };
            if cancel.is_some_and(CancelToken::is_cancelled) {
                tracing::trace!(label = %self.shared.label, "put interrupted");
                return Err(PutError::Interrupted(value));
            }
            match deadline {
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        tracing::trace!(label = %self.shared.label, "put timed out");
                        return Err(PutError::TimedOut(value));
                    }
                    self.shared.not_full.wait_until(&mut ring, deadline);
                }
                None => self.shared.not_full.wait(&mut ring),
            }
        }
    }

    fn get_inner(
        &self,
        cancel: Option<&CancelToken>,
        deadline: Option<Instant>,
    ) -> Result<T, GetError> {
        let mut ring = self.shared.ring.lock();
        loop {
            if let Some(value) = ring.pop() {
                self.shared.not_full.notify_one();
                return Ok(value);
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                tracing::trace!(label = %self.shared.label, "get interrupted");
                return Err(GetError::Interrupted);
            }
            match deadline {
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        tracing::trace!(label = %self.shared.label, "get timed out");
                        return Err(GetError::TimedOut);
                    }
                    self.shared.not_empty.wait_until(&mut ring, deadline);
                }
                None => self.shared.not_empty.wait(&mut ring),
            }
        }
    }
}

impl<T: Send + 'static> BoundedBlockingQueue<T> {
    /// Like [`put`](Self::put), but returns [`PutError::Interrupted`] with the
    /// value if `cancel` fires while waiting for space.
    pub fn put_cancellable(&self, value: T, cancel: &CancelToken) -> Result<(), PutError<T>> {
        let value = match self.try_put(value) {
            Ok(()) => return Ok(()),
            Err(err) => err.into_inner(),
        };
        let _registration = cancel.register(self.interrupter());
        self.put_inner(value, Some(cancel), None)
    }

    /// Like [`get`](Self::get), but returns [`GetError::Interrupted`] if
    /// `cancel` fires while waiting for an element.
    pub fn get_cancellable(&self, cancel: &CancelToken) -> Result<T, GetError> {
        if let Ok(value) = self.try_get() {
            return Ok(value);
        }
        let _registration = cancel.register(self.interrupter());
        self.get_inner(Some(cancel), None)
    }

    fn interrupter(&self) -> Arc<dyn Interrupt> {
        Arc::clone(&self.shared) as Arc<dyn Interrupt>
    }
}

impl<T> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBlockingQueue")
            .field("label", &self.shared.label)
            .field("capacity", &self.shared.capacity)
            .field("len", &self.len())
            .finish()
    }
}
