use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace, warn, Instrument};
use uuid::Uuid;

use super::completion::Completion;
use super::context::TrackingContext;
use super::data::{Settlement, TrackingData};

/// Per-invocation lifecycle, emitted at `trace` level.
///
/// `Dispatched -> (SyncDone | Awaiting) -> Tracked -> Settled`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationPhase {
    /// The original method has been called.
    Dispatched,
    /// It returned an immediate value.
    SyncDone,
    /// It returned a suspended result; the wrapper is waiting on it.
    Awaiting,
    /// The payload was handed to the sink (or skipped for lack of one).
    Tracked,
    /// The caller is about to observe the final value or failure.
    Settled,
}

/// A tracking wrapper factory, configured once with its `TrackingData`.
pub struct TrackEvent<C: TrackingContext, A, T, E> {
    data: Arc<TrackingData<C, A, T, E>>,
}

impl<C: TrackingContext, A, T, E> Clone for TrackEvent<C, A, T, E> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<C: TrackingContext, A, T, E> fmt::Debug for TrackEvent<C, A, T, E>
where
    C::Payload: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackEvent").field("data", &self.data).finish()
    }
}

/// `track_event(data).wrap(method)`
pub fn track_event<C: TrackingContext, A, T, E>(
    data: TrackingData<C, A, T, E>,
) -> TrackEvent<C, A, T, E> {
    TrackEvent::new(data)
}

impl<C: TrackingContext, A, T, E> TrackEvent<C, A, T, E> {
    pub fn new(data: TrackingData<C, A, T, E>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Wraps `method`. The host installs the result in place of the original.
    pub fn wrap<M>(&self, method: M) -> TrackedMethod<C, A, T, E, M>
    where
        M: Fn(&Arc<C>, A) -> Result<Completion<T, E>, E>,
    {
        TrackedMethod {
            name: "method",
            data: Arc::clone(&self.data),
            method,
        }
    }
}

/// A method that dispatches a tracking payload after every completion.
pub struct TrackedMethod<C: TrackingContext, A, T, E, M> {
    name: &'static str,
    data: Arc<TrackingData<C, A, T, E>>,
    method: M,
}

impl<C: TrackingContext, A, T, E, M: Clone> Clone for TrackedMethod<C, A, T, E, M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            data: Arc::clone(&self.data),
            method: self.method.clone(),
        }
    }
}

impl<C, A, T, E, M> TrackedMethod<C, A, T, E, M>
where
    C: TrackingContext,
    C::Payload: Clone + Sync,
    A: Clone + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: Fn(&Arc<C>, A) -> Result<Completion<T, E>, E>,
{
    /// Sets the method name shown in log spans.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the original method on `ctx`, then tracks its completion.
    ///
    /// A synchronous `Err` is returned straight away and nothing is tracked.
    /// A suspended result is re-wrapped: the returned future settles to the
    /// same value or failure, after the payload has been dispatched.
    pub fn call(&self, ctx: &Arc<C>, args: A) -> Result<Completion<T, E>, E> {
        let invocation = Uuid::new_v4();
        let span = debug_span!("track_event", method = self.name, %invocation);
        let _entered = span.enter();

        let captured = self.data.capture(&args);
        trace!(phase = ?InvocationPhase::Dispatched);

        let completion = match (self.method)(ctx, args) {
            Ok(completion) => completion,
            Err(error) => {
                debug!("method failed synchronously, nothing tracked");
                return Err(error);
            }
        };

        match completion {
            Completion::Immediate(value) => {
                trace!(phase = ?InvocationPhase::SyncDone);
                dispatch(&self.data, ctx, captured.as_ref(), Settlement::Returned(&value));
                trace!(phase = ?InvocationPhase::Settled);
                Ok(Completion::Immediate(value))
            }
            Completion::Suspended(pending) => {
                trace!(phase = ?InvocationPhase::Awaiting);
                let data = Arc::clone(&self.data);
                let ctx = Arc::clone(ctx);

                let tracked = async move {
                    let settled = pending.await;
                    let settlement = match &settled {
                        Ok(value) => Settlement::Resolved(value),
                        Err(error) => Settlement::Rejected(error),
                    };
                    dispatch(&data, &ctx, captured.as_ref(), settlement);
                    trace!(phase = ?InvocationPhase::Settled, failed = settled.is_err());
                    settled
                };

                Ok(Completion::suspended(tracked.instrument(span.clone())))
            }
        }
    }

    /// The wrapped method as a plain closure with the original's signature.
    pub fn into_fn(self) -> impl Fn(&Arc<C>, A) -> Result<Completion<T, E>, E> {
        move |ctx: &Arc<C>, args: A| self.call(ctx, args)
    }
}

fn dispatch<C, A, T, E>(
    data: &TrackingData<C, A, T, E>,
    ctx: &C,
    args: Option<&A>,
    settlement: Settlement<'_, T, E>,
) where
    C: TrackingContext,
    C::Payload: Clone,
{
    let Some(tracking) = ctx.tracking() else {
        debug!("context has no tracking sink, payload skipped");
        trace!(phase = ?InvocationPhase::Tracked);
        return;
    };

    let Some(payload) = data.payload(ctx, args, settlement) else {
        warn!("call arguments were not captured, payload skipped");
        return;
    };

    // Sink failures stay on the side channel.
    if let Err(error) = tracking.track_event(payload) {
        warn!(%error, "tracking sink failed");
    }
    trace!(phase = ?InvocationPhase::Tracked);
}
