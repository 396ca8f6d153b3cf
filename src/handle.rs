use std::future::pending;
use std::time::Duration;

use mailbox_fsm_core::{ProcessError, State};
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::worker::Action;

/// Handle used to submit data to a running machine.
///
/// Cheap to clone; every clone talks to the same worker. The machine stops
/// once its cancellation token fires or the last handle is dropped.
#[derive(Debug, Clone)]
pub struct MachineHandle<S: State> {
    id: u64,
    mailbox: mpsc::Sender<Action<S>>,
    state_rx: watch::Receiver<S>,
    cancel: CancellationToken,
    submission_timeout: Duration,
}

impl<S: State> MachineHandle<S> {
    pub(crate) fn new(
        id: u64,
        mailbox: mpsc::Sender<Action<S>>,
        state_rx: watch::Receiver<S>,
        cancel: CancellationToken,
        submission_timeout: Duration,
    ) -> Self {
        Self {
            id,
            mailbox,
            state_rx,
            cancel,
            submission_timeout,
        }
    }

    /// Submits `data` to the current state and waits for the outcome.
    ///
    /// The worker must accept the submission within the submission timeout,
    /// otherwise this returns [`ProcessError::Timeout`] and the submission is
    /// dropped. Once accepted, the call waits for the state function to
    /// finish, however long that takes, and returns its result. On success
    /// the transition has been applied before this returns.
    ///
    /// After shutdown nothing drains the mailbox, so every call ends with
    /// [`ProcessError::Timeout`] once the timeout has elapsed.
    pub async fn process(&self, data: S::Data) -> Result<(), ProcessError<S::Error>> {
        let (accepted_tx, accepted_rx) = oneshot::channel();
        let (reply_tx, reply_rx) = oneshot::channel();
        let action = Action {
            data,
            accepted: accepted_tx,
            reply: reply_tx,
        };

        let handoff = async move {
            if self.mailbox.send(action).await.is_err() || accepted_rx.await.is_err() {
                // The worker is gone and will never accept anything again.
                pending::<()>().await;
            }
        };

        if tokio::time::timeout(self.submission_timeout, handoff)
            .await
            .is_err()
        {
            return Err(ProcessError::Timeout {
                after: self.submission_timeout,
            });
        }

        reply_rx.await.unwrap_or(Err(ProcessError::Terminated))
    }

    /// Returns the state published by the worker after its last transition.
    pub fn current_state(&self) -> S {
        self.state_rx.borrow().clone()
    }

    /// Waits for the machine to reach the specified state.
    ///
    /// Fails once the worker has stopped without reaching it.
    pub async fn wait_for_state(&self, target: S) -> Result<(), watch::error::RecvError>
    where
        S: PartialEq,
    {
        let mut rx = self.state_rx.clone();
        while *rx.borrow_and_update() != target {
            rx.changed().await?;
        }
        Ok(())
    }

    /// Stops the worker. Queued submissions are not drained.
    ///
    /// A state function that is already running finishes first.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once this machine's cancellation token has fired.
    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Handoff window applied to each `process` call.
    pub fn submission_timeout(&self) -> Duration {
        self.submission_timeout
    }

    /// Process-unique id, also recorded on the worker's tracing span.
    pub fn id(&self) -> u64 {
        self.id
    }
}
