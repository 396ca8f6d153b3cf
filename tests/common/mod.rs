#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use mailbox_fsm::{State, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub command: String,
}

pub fn cmd(command: &str) -> Command {
    Command {
        command: command.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    #[error("unsupported command")]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    Off,
    On,
}

impl Switch {
    /// Pure transition table, shared by the state impl and the tests' oracle.
    pub fn step(self, command: &str) -> Result<Switch, SwitchError> {
        match (self, command) {
            (Switch::Off, "start") => Ok(Switch::On),
            (Switch::On, "stop") => Ok(Switch::Off),
            _ => Err(SwitchError::Unsupported),
        }
    }
}

impl State for Switch {
    type Data = Command;
    type Error = SwitchError;

    async fn apply(&self, data: Command) -> Result<Transition<Self>, SwitchError> {
        self.step(&data.command).map(Transition::to)
    }

    fn name(&self) -> &str {
        match self {
            Switch::Off => "off",
            Switch::On => "on",
        }
    }
}

/// Records every submission it sees and optionally sleeps while "busy".
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl State for Recorder {
    type Data = (String, Duration);
    type Error = std::convert::Infallible;

    async fn apply(
        &self,
        (label, busy_for): (String, Duration),
    ) -> Result<Transition<Self>, Self::Error> {
        self.log.lock().unwrap().push(label);
        if !busy_for.is_zero() {
            tokio::time::sleep(busy_for).await;
        }
        Ok(Transition::stay())
    }
}

/// Instrumented state recording how many invocations overlap in time.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub active: Arc<AtomicUsize>,
    pub max_active: Arc<AtomicUsize>,
    pub intervals: Arc<Mutex<Vec<(Instant, Instant)>>>,
}

impl State for Probe {
    type Data = u32;
    type Error = std::convert::Infallible;

    async fn apply(&self, _caller: u32) -> Result<Transition<Self>, Self::Error> {
        let entered = Instant::now();
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(1)).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        let exited = Instant::now();
        self.intervals.lock().unwrap().push((entered, exited));
        Ok(Transition::stay())
    }
}
