use std::fmt;

use thiserror::Error;

/// Errors raised while constructing a queue.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue capacity must be at least 1, got {requested}")]
    InvalidCapacity { requested: usize },
}

/// Reasons a `put` did not insert its value. The value is handed back.
#[derive(Error, Clone, PartialEq, Eq)]
pub enum PutError<T> {
    #[error("put interrupted while waiting for space")]
    Interrupted(T),
    #[error("timed out waiting for space")]
    TimedOut(T),
    #[error("queue is full")]
    Full(T),
}

impl<T> PutError<T> {
    /// Recovers the value that was not inserted.
    pub fn into_inner(self) -> T {
        match self {
            PutError::Interrupted(value) | PutError::TimedOut(value) | PutError::Full(value) => {
                value
            }
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, PutError::Interrupted(_))
    }
}

impl<T> fmt::Debug for PutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutError::Interrupted(_) => f.write_str("Interrupted(..)"),
            PutError::TimedOut(_) => f.write_str("TimedOut(..)"),
            PutError::Full(_) => f.write_str("Full(..)"),
        }
    }
}

/// Reasons a `get` returned without an element.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GetError {
    #[error("get interrupted while waiting for an element")]
    Interrupted,
    #[error("timed out waiting for an element")]
    TimedOut,
    #[error("queue is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_error_returns_value() {
        let err = PutError::Interrupted(String::from("payload"));
        assert!(err.is_interrupted());
        assert_eq!(err.into_inner(), "payload");
        assert_eq!(PutError::Full(3).into_inner(), 3);
    }

    #[test]
    fn debug_does_not_need_debug_payload() {
        struct Opaque;
        let err = PutError::TimedOut(Opaque);
        assert_eq!(format!("{err:?}"), "TimedOut(..)");
        assert_eq!(err.to_string(), "timed out waiting for space");
    }
}
