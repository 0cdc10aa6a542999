use thiserror::Error;

use crate::queue::TimerId;

/// Error type returned by timer callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EventLoopError {
    #[error("timer {id} callback failed")]
    Callback {
        id: TimerId,
        #[source]
        source: BoxError,
    },
}
