use std::time::Duration;

use crate::ConfigError;

/// How long `process` waits for the worker to accept a submission.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(1);

/// Number of offers that may sit in the mailbox waiting for the worker.
///
/// A single slot keeps the handoff close to a rendezvous.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1;

/// Runtime settings for one machine.
///
/// # Example
///
/// ```rust
/// # use mailbox_fsm_core::MachineConfig;
/// # use std::time::Duration;
/// let config = MachineConfig::default()
///     .parse_submission_timeout("250ms")
///     .unwrap()
///     .with_mailbox_capacity(4);
///
/// assert_eq!(config.submission_timeout, Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Fixed window for the mailbox handoff of each `process` call.
    pub submission_timeout: Duration,
    /// Bounded capacity of the mailbox channel.
    pub mailbox_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            submission_timeout: DEFAULT_SUBMISSION_TIMEOUT,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Sets the handoff window used by every `process` call.
    #[must_use]
    pub fn with_submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }

    /// Sets how many offers may wait in the mailbox.
    #[must_use]
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Sets the submission timeout from a human readable duration such as
    /// `"250ms"` or `"2s"`.
    pub fn parse_submission_timeout(mut self, input: &str) -> Result<Self, ConfigError> {
        self.submission_timeout =
            humantime::parse_duration(input).map_err(|source| ConfigError::InvalidDuration {
                input: input.to_string(),
                source,
            })?;
        Ok(self)
    }

    /// Rejects settings the runtime cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submission_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
