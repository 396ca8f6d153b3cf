use mailbox_fsm_core::{ProcessError, State, Transition};
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::machine::{ExitReason, MachineExit};

/// One caller's submission as it travels through the mailbox.
pub(crate) struct Action<S: State> {
    pub(crate) data: S::Data,
    /// Signalled by the worker right before the state function runs.
    pub(crate) accepted: oneshot::Sender<()>,
    pub(crate) reply: oneshot::Sender<Result<(), ProcessError<S::Error>>>,
}

/// Sole owner of the current state.
pub(crate) struct Worker<S: State> {
    state: S,
    applied: u64,
    rejected: u64,
    discarded: u64,
}

impl<S: State> Worker<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            state: initial,
            applied: 0,
            rejected: 0,
            discarded: 0,
        }
    }

    pub(crate) async fn run(
        mut self,
        mut mailbox: mpsc::Receiver<Action<S>>,
        cancel: CancellationToken,
        state_tx: watch::Sender<S>,
    ) -> MachineExit<S> {
        debug!(state = self.state.name(), "worker started");

        let reason = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break ExitReason::Cancelled,
                action = mailbox.recv() => {
                    let Some(action) = action else { break ExitReason::Detached };
                    self.handle(action, &state_tx).await;
                }
            }
        };

        // Offers still queued are dropped with the receiver; their callers
        // run into the submission timeout.
        mailbox.close();

        debug!(
            state = self.state.name(),
            ?reason,
            applied = self.applied,
            rejected = self.rejected,
            discarded = self.discarded,
            "worker stopped"
        );

        MachineExit {
            state: self.state,
            reason,
            applied: self.applied,
            rejected: self.rejected,
            discarded: self.discarded,
        }
    }

    async fn handle(&mut self, action: Action<S>, state_tx: &watch::Sender<S>) {
        let Action {
            data,
            accepted,
            reply,
        } = action;

        if accepted.send(()).is_err() {
            // The caller already gave up with a timeout.
            self.discarded += 1;
            debug!(state = self.state.name(), "discarding abandoned submission");
            return;
        }

        trace!(state = self.state.name(), "applying submission");
        let result = self.state.apply(data).await;

        let outcome = match result {
            Ok(Transition::Stay) => {
                self.applied += 1;
                Ok(())
            }
            Ok(Transition::To(next)) => {
                debug!(from = self.state.name(), to = next.name(), "transition");
                self.state = next;
                state_tx.send_replace(self.state.clone());
                self.applied += 1;
                Ok(())
            }
            Err(err) => {
                self.rejected += 1;
                debug!(state = self.state.name(), "transition rejected");
                Err(ProcessError::Transition(err))
            }
        };

        let _ = reply.send(outcome);
    }
}
