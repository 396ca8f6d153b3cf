//! Example: on/off switch driven by concurrent callers

use std::time::Duration;

use mailbox_fsm::{Machine, MachineConfig, ProcessError, State, Transition};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct Data {
    pub command: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("unsupported command {0:?}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    Off,
    On,
}

impl State for Switch {
    type Data = Data;
    type Error = SwitchError;

    async fn apply(&self, data: Data) -> Result<Transition<Self>, SwitchError> {
        match (self, data.command.as_str()) {
            (Switch::Off, "start") => {
                // Simulate warming up
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(Transition::to(Switch::On))
            }
            (Switch::On, "stop") => Ok(Transition::to(Switch::Off)),
            (_, "status") => Ok(Transition::stay()),
            _ => Err(SwitchError::Unsupported(data.command)),
        }
    }

    fn name(&self) -> &str {
        match self {
            Switch::Off => "off",
            Switch::On => "on",
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cancel = CancellationToken::new();
    let config = MachineConfig::default()
        .parse_submission_timeout("500ms")
        .unwrap();
    let (handle, task) = Machine::spawn_with_config(cancel.clone(), Switch::Off, config).unwrap();

    let mut callers = Vec::new();
    for command in ["start", "status", "stop", "jump", "start"] {
        let handle = handle.clone();
        callers.push(tokio::spawn(async move {
            let data = Data {
                command: command.to_string(),
            };
            match handle.process(data).await {
                Ok(()) => tracing::info!(command, state = ?handle.current_state(), "applied"),
                Err(ProcessError::Transition(err)) => tracing::warn!(command, %err, "rejected"),
                Err(err) => tracing::error!(command, %err, "not processed"),
            }
        }));
    }
    for caller in callers {
        caller.await.unwrap();
    }

    // Shut down through the parent scope
    cancel.cancel();

    let exit = task.await.unwrap();
    tracing::info!(
        state = ?exit.state,
        applied = exit.applied,
        rejected = exit.rejected,
        "machine stopped"
    );
}
