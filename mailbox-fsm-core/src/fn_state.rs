use std::fmt;
use std::future::{Future, ready};
use std::sync::Arc;

use crate::{State, Transition};

type StateFn<D, E> = dyn Fn(D) -> Result<Transition<FnState<D, E>>, E> + Send + Sync;

/// A state whose behavior is a plain function value.
///
/// Useful when states are assembled at runtime instead of being enumerated up
/// front. Two `FnState`s are equal only when they wrap the same function
/// allocation; the label is for logs and does not take part in equality.
///
/// # Example
///
/// ```rust
/// use mailbox_fsm_core::{FnState, Transition};
///
/// let idle: FnState<u32, String> = FnState::new("idle", |n| {
///     if n > 10 {
///         Err(format!("{n} is too large"))
///     } else {
///         Ok(Transition::stay())
///     }
/// });
///
/// assert_eq!(idle.label(), "idle");
/// assert_eq!(idle, idle.clone());
/// ```
pub struct FnState<D, E> {
    label: Arc<str>,
    func: Arc<StateFn<D, E>>,
}

impl<D, E> FnState<D, E> {
    /// Wraps `func` as a state named `label`.
    pub fn new<F>(label: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(D) -> Result<Transition<FnState<D, E>>, E> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Name given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Calls the wrapped function directly, outside of any machine.
    pub fn call(&self, data: D) -> Result<Transition<FnState<D, E>>, E> {
        (self.func)(data)
    }
}

impl<D, E> Clone for FnState<D, E> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            func: Arc::clone(&self.func),
        }
    }
}

impl<D, E> PartialEq for FnState<D, E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<D, E> Eq for FnState<D, E> {}

impl<D, E> fmt::Debug for FnState<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnState").field(&self.label).finish()
    }
}

impl<D, E> State for FnState<D, E>
where
    D: Send + 'static,
    E: Send + 'static,
{
    type Data = D;
    type Error = E;

    fn apply(&self, data: D) -> impl Future<Output = Result<Transition<Self>, E>> + Send {
        ready(self.call(data))
    }

    fn name(&self) -> &str {
        self.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_states() -> (FnState<i32, String>, FnState<i32, String>) {
        let negative: FnState<i32, String> = FnState::new("negative", |n: i32| {
            if n < 0 {
                Ok(Transition::stay())
            } else {
                Err(format!("expected a negative number, got {n}"))
            }
        });
        let next = negative.clone();
        let start = FnState::new("start", move |n: i32| {
            if n < 0 {
                Ok(Transition::to(next.clone()))
            } else {
                Ok(Transition::stay())
            }
        });
        (start, negative)
    }

    #[test]
    fn test_identity_is_function_not_label() {
        let a: FnState<i32, String> = FnState::new("same", |_| Ok(Transition::stay()));
        let b: FnState<i32, String> = FnState::new("same", |_| Ok(Transition::stay()));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[tokio::test]
    async fn test_apply_follows_returned_state() {
        let (start, negative) = counter_states();

        let stayed = start.apply(5).await.unwrap().into_state(start.clone());
        assert_eq!(stayed, start);

        let moved = start.apply(-1).await.unwrap().into_state(start.clone());
        assert_eq!(moved, negative);
        assert_eq!(moved.name(), "negative");

        let err = moved.apply(3).await.unwrap_err();
        assert_eq!(err, "expected a negative number, got 3");
    }

    #[test]
    fn test_debug_shows_label() {
        let (start, _) = counter_states();
        assert_eq!(format!("{start:?}"), "FnState(\"start\")");
    }
}
