use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use mailbox_fsm_core::{ConfigError, MachineConfig, State, TaskError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::handle::MachineHandle;
use crate::worker::Worker;

static NEXT_MACHINE_ID: AtomicU64 = AtomicU64::new(1);

/// Entry point for starting state machines.
///
/// Every machine runs its own worker task, bound to a child of the supplied
/// cancellation token. Cancelling the parent stops the machine; calling
/// [`MachineHandle::shutdown`] stops only this machine.
///
/// All constructors spawn onto the current Tokio runtime and panic when
/// called outside of one, like [`tokio::spawn`].
#[derive(Debug, Clone, Copy)]
pub struct Machine;

impl Machine {
    /// Starts a machine with the default configuration and detaches its task.
    pub fn new<S: State>(cancel: CancellationToken, initial: S) -> MachineHandle<S> {
        let (handle, _task) = Self::spawn(cancel, initial);
        handle
    }

    /// Starts a machine with the default configuration.
    pub fn spawn<S: State>(
        cancel: CancellationToken,
        initial: S,
    ) -> (MachineHandle<S>, MachineTask<S>) {
        Self::start(cancel, initial, MachineConfig::default())
    }

    /// Starts a machine with a custom configuration.
    pub fn spawn_with_config<S: State>(
        cancel: CancellationToken,
        initial: S,
        config: MachineConfig,
    ) -> Result<(MachineHandle<S>, MachineTask<S>), ConfigError> {
        config.validate()?;
        Ok(Self::start(cancel, initial, config))
    }

    fn start<S: State>(
        cancel: CancellationToken,
        initial: S,
        config: MachineConfig,
    ) -> (MachineHandle<S>, MachineTask<S>) {
        let id = NEXT_MACHINE_ID.fetch_add(1, Ordering::Relaxed);
        let (mailbox_tx, mailbox_rx) = mpsc::channel(config.mailbox_capacity);
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let cancel = cancel.child_token();

        let worker = Worker::new(initial);
        let span = tracing::info_span!("machine", id);
        let handle = tokio::spawn(
            worker
                .run(mailbox_rx, cancel.clone(), state_tx)
                .instrument(span),
        );

        (
            MachineHandle::new(id, mailbox_tx, state_rx, cancel, config.submission_timeout),
            MachineTask { handle },
        )
    }
}

/// Why the worker loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The machine's cancellation token fired.
    Cancelled,
    /// Every handle was dropped, so nothing could submit work any more.
    Detached,
}

/// Final report of a stopped machine.
#[derive(Debug, Clone)]
pub struct MachineExit<S> {
    /// State the machine was in when the worker stopped.
    pub state: S,
    /// Why the worker loop stopped.
    pub reason: ExitReason,
    /// Submissions that ended in a transition, including self-loops.
    pub applied: u64,
    /// Submissions rejected by a state function.
    pub rejected: u64,
    /// Submissions dropped because their caller had already timed out.
    pub discarded: u64,
}

/// The machine's background task.
///
/// Resolves once the worker loop has stopped.
#[derive(Debug)]
pub struct MachineTask<S> {
    handle: JoinHandle<MachineExit<S>>,
}

impl<S> MachineTask<S> {
    /// Returns `true` once the worker loop has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<S> Future for MachineTask<S> {
    type Output = Result<MachineExit<S>, TaskError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(exit)) => Poll::Ready(Ok(exit)),
            Poll::Ready(Err(e)) => Poll::Ready(Err(TaskError::Join(e))),
            Poll::Pending => Poll::Pending,
        }
    }
}
