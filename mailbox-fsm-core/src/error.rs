use std::time::Duration;

/// Error returned to a caller of `process`.
///
/// # Type Parameters
///
/// * `E`: the error type of the machine's [`State`](crate::State).
#[derive(Debug, thiserror::Error)]
pub enum ProcessError<E> {
    /// The worker did not accept the submission within the submission
    /// timeout. No state change happened on behalf of this call.
    #[error("submission timed out after {after:?}")]
    Timeout { after: Duration },
    /// The active state rejected the data. The current state is unchanged.
    #[error("{0}")]
    Transition(E),
    /// The worker accepted the submission but stopped before replying, which
    /// only happens when the state function panicked.
    #[error("worker terminated before the submission completed")]
    Terminated,
}

impl<E> ProcessError<E> {
    /// Returns `true` for [`ProcessError::Timeout`].
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Borrows the state's error, if that is what this is.
    #[must_use]
    pub fn transition_error(&self) -> Option<&E> {
        match self {
            Self::Transition(err) => Some(err),
            _ => None,
        }
    }

    /// Takes the state's error, if that is what this is.
    pub fn into_transition_error(self) -> Option<E> {
        match self {
            Self::Transition(err) => Some(err),
            _ => None,
        }
    }
}

/// Error returned by the machine's background task.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The worker task panicked or was aborted by the runtime.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Error produced when building or validating a [`MachineConfig`](crate::MachineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not a duration `humantime` understands.
    #[error("invalid duration {input:?}: {source}")]
    InvalidDuration {
        input: String,
        #[source]
        source: humantime::DurationError,
    },
    /// A zero window would time out every submission.
    #[error("submission timeout must be greater than zero")]
    ZeroTimeout,
    /// Tokio channels need at least one slot.
    #[error("mailbox capacity must be greater than zero")]
    ZeroCapacity,
}
