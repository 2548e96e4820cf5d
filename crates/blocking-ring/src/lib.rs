//! Fixed-capacity blocking ring buffer.
//!
//! [`BoundedBlockingQueue`] is a classic monitor: one mutex guards the ring
//! storage and two condition variables park producers while the ring is full
//! and consumers while it is empty. Suspended operations can be interrupted
//! through a [`CancelToken`] or bounded by a deadline.

pub mod cancel;
pub mod config;
pub mod error;
pub mod queue;
mod ring;

pub use cancel::CancelToken;
pub use config::QueueConfig;
pub use error::{GetError, PutError, QueueError};
pub use queue::BoundedBlockingQueue;
