//! A single-threaded queue of deferred callbacks.
//!
//! Callbacks fire in order of eligible time (registration time plus delay),
//! ties broken by registration order, and never before the synchronous code
//! that registered them has returned.

mod error;
mod event_loop;
mod queue;

pub use error::{BoxError, EventLoopError};
pub use event_loop::{Callback, EventLoop};
pub use queue::TimerId;
