//! Core state and error types for mailbox-fsm.
//!
//! This crate holds the vocabulary shared by the runtime: the [`State`] trait
//! implemented by user state machines, the [`Transition`] returned from a
//! state's behavior, the function-valued [`FnState`] adapter, the error types
//! surfaced to callers and [`MachineConfig`].

mod config;
mod error;
mod fn_state;

use std::future::Future;

pub use crate::config::{DEFAULT_MAILBOX_CAPACITY, DEFAULT_SUBMISSION_TIMEOUT, MachineConfig};
pub use crate::error::{ConfigError, ProcessError, TaskError};
pub use crate::fn_state::FnState;

/// Represents the outcome of a successful state function.
///
/// Returned from [`State::apply`] to tell the worker loop which state the
/// machine should be in once the current piece of data has been consumed.
///
/// # Example
///
/// ```rust
/// # use mailbox_fsm_core::Transition;
/// #[derive(Debug, Clone, PartialEq)]
/// enum Lamp {
///     Off,
///     On,
/// }
///
/// let next: Transition<Lamp> = Transition::to(Lamp::On);
/// assert_eq!(next.into_state(Lamp::Off), Lamp::On);
///
/// let same: Transition<Lamp> = Transition::stay();
/// assert_eq!(same.into_state(Lamp::Off), Lamp::Off);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S> {
    /// Transition to the specified target state.
    To(S),
    /// Remain in the current state.
    Stay,
}

impl<S> Transition<S> {
    /// Creates a transition to the specified target state.
    #[must_use]
    pub fn to(state: S) -> Self {
        Self::To(state)
    }

    /// Creates a self-loop: the machine keeps its current state.
    #[must_use]
    pub fn stay() -> Self {
        Self::Stay
    }

    /// Returns `true` if the transition leaves the current state untouched.
    #[must_use]
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }

    /// Resolves the transition against the state that produced it.
    #[must_use]
    pub fn into_state(self, current: S) -> S {
        match self {
            Self::To(state) => state,
            Self::Stay => current,
        }
    }
}

/// A named unit of transition logic.
///
/// One type implements `State` for a whole machine, typically an enum with one
/// variant per named state. The machine's worker loop owns the current value
/// and calls [`apply`](State::apply) with each submitted piece of data.
///
/// `apply` takes `&self`: a state function cannot modify the current state in
/// place. The only way to change state is to return [`Transition::To`], and
/// the worker ignores any change when `apply` returns an error.
///
/// # Example
///
/// ```rust
/// use mailbox_fsm_core::{State, Transition};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Door {
///     Closed,
///     Open,
/// }
///
/// #[derive(Debug)]
/// struct Stuck;
///
/// impl State for Door {
///     type Data = &'static str;
///     type Error = Stuck;
///
///     async fn apply(&self, push: &'static str) -> Result<Transition<Self>, Stuck> {
///         match (self, push) {
///             (Door::Closed, "open") => Ok(Transition::to(Door::Open)),
///             (Door::Open, "close") => Ok(Transition::to(Door::Closed)),
///             _ => Err(Stuck),
///         }
///     }
/// }
/// ```
pub trait State: Clone + std::fmt::Debug + Send + Sync + Sized + 'static {
    /// Payload submitted by callers on each `process` call.
    type Data: Send + 'static;
    /// Error returned when the state rejects its input.
    type Error: Send + 'static;

    /// Consumes one piece of data and decides the next state.
    fn apply(
        &self,
        data: Self::Data,
    ) -> impl Future<Output = Result<Transition<Self>, Self::Error>> + Send;

    /// Human readable name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
