//! Example: request handlers submitting to one shared turnstile machine
//!
//! Each simulated request is handled on its own task, the way an HTTP server
//! would call a handler per inbound request. Handlers only translate the
//! outcome of `process` into a status code.

use mailbox_fsm::{Machine, MachineHandle, ProcessError, State, Transition};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub enum Request {
    Coin { cents: u32 },
    Push,
}

#[derive(Debug, thiserror::Error)]
pub enum TurnstileError {
    #[error("{cents} cents is not enough")]
    Underpaid { cents: u32 },
    #[error("turnstile is locked")]
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turnstile {
    Locked,
    Unlocked,
}

const FARE_CENTS: u32 = 250;

impl State for Turnstile {
    type Data = Request;
    type Error = TurnstileError;

    async fn apply(&self, request: Request) -> Result<Transition<Self>, TurnstileError> {
        match (self, request) {
            (_, Request::Coin { cents }) if cents < FARE_CENTS => {
                Err(TurnstileError::Underpaid { cents })
            }
            (Turnstile::Locked, Request::Coin { .. }) => Ok(Transition::to(Turnstile::Unlocked)),
            // Extra coins are accepted while unlocked
            (Turnstile::Unlocked, Request::Coin { .. }) => Ok(Transition::stay()),
            (Turnstile::Unlocked, Request::Push) => Ok(Transition::to(Turnstile::Locked)),
            (Turnstile::Locked, Request::Push) => Err(TurnstileError::Locked),
        }
    }
}

/// Maps a submission outcome to an HTTP status code.
async fn handle(machine: &MachineHandle<Turnstile>, request: Request) -> u16 {
    match machine.process(request).await {
        Ok(()) => 200,
        Err(ProcessError::Transition(TurnstileError::Underpaid { .. })) => 402,
        Err(ProcessError::Transition(TurnstileError::Locked)) => 409,
        Err(ProcessError::Timeout { .. }) => 503,
        Err(ProcessError::Terminated) => 500,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cancel = CancellationToken::new();
    let machine = Machine::new(cancel.clone(), Turnstile::Locked);

    let requests = vec![
        Request::Push,
        Request::Coin { cents: 100 },
        Request::Coin { cents: 250 },
        Request::Push,
        Request::Push,
    ];

    for request in requests {
        let machine = machine.clone();
        let response = tokio::spawn(async move {
            let status = handle(&machine, request.clone()).await;
            (request, status, machine.current_state())
        });
        let (request, status, state) = response.await.unwrap();
        tracing::info!(?request, status, ?state, "handled");
    }

    cancel.cancel();
    // After shutdown requests are answered once the submission timeout passes.
    let started = tokio::time::Instant::now();
    let status = handle(&machine, Request::Push).await;
    tracing::info!(
        status,
        waited = ?started.elapsed(),
        "handled after shutdown"
    );
}
