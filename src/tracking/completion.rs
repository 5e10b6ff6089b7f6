use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

/// What a method hands back to its caller: a value known right away, or a
/// result that settles later.
///
/// A synchronous failure is not a `Completion`; methods report it as the
/// `Err` of `Result<Completion<T, E>, E>`.
pub enum Completion<T, E> {
    Immediate(T),
    Suspended(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Completion<T, E> {
    pub fn immediate(value: T) -> Self {
        Completion::Immediate(value)
    }

    pub fn suspended<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Completion::Suspended(future.boxed())
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, Completion::Suspended(_))
    }

    /// Drives the completion to its final result.
    pub async fn settle(self) -> Result<T, E> {
        match self {
            Completion::Immediate(value) => Ok(value),
            Completion::Suspended(pending) => pending.await,
        }
    }

    /// The immediate value, if the completion did not suspend.
    pub fn into_immediate(self) -> Option<T> {
        match self {
            Completion::Immediate(value) => Some(value),
            Completion::Suspended(_) => None,
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Completion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Completion::Suspended(_) => f.write_str("Suspended(..)"),
        }
    }
}
