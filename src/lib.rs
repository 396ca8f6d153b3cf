//! # mailbox-fsm
//!
//! An actor-style Tokio state machine. Any number of tasks may submit data
//! concurrently; a single worker task owns the current state and applies one
//! submission at a time, so state functions never run concurrently.
//!
//! ## Example
//!
//! ```rust
//! use mailbox_fsm::{Machine, ProcessError, State, Transition};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Switch {
//!     Off,
//!     On,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Unsupported;
//!
//! impl std::fmt::Display for Unsupported {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("unsupported command")
//!     }
//! }
//!
//! impl State for Switch {
//!     type Data = &'static str;
//!     type Error = Unsupported;
//!
//!     async fn apply(&self, command: &'static str) -> Result<Transition<Self>, Unsupported> {
//!         match (self, command) {
//!             (Switch::Off, "start") => Ok(Transition::to(Switch::On)),
//!             (Switch::On, "stop") => Ok(Transition::to(Switch::Off)),
//!             _ => Err(Unsupported),
//!         }
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cancel = CancellationToken::new();
//! let machine = Machine::new(cancel.clone(), Switch::Off);
//!
//! machine.process("start").await.unwrap();
//! assert_eq!(machine.current_state(), Switch::On);
//!
//! let err = machine.process("bogus").await.unwrap_err();
//! assert!(matches!(err, ProcessError::Transition(Unsupported)));
//! assert_eq!(machine.current_state(), Switch::On);
//!
//! cancel.cancel();
//! # }
//! ```

mod handle;
mod machine;
mod worker;

pub use crate::handle::MachineHandle;
pub use crate::machine::{ExitReason, Machine, MachineExit, MachineTask};
#[doc(inline)]
pub use mailbox_fsm_core::*;
