use std::fmt;

use super::context::TrackingContext;

/// How a tracked invocation completed. Handed to `TrackingData::Settled`
/// functions so the payload can describe the outcome.
#[derive(Debug)]
pub enum Settlement<'a, T, E> {
    /// The method returned an immediate value.
    Returned(&'a T),
    /// The suspended result resolved.
    Resolved(&'a T),
    /// The suspended result failed.
    Rejected(&'a E),
}

impl<T, E> Settlement<'_, T, E> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settlement::Rejected(_))
    }
}

type Props<C> = <C as TrackingContext>::Props;
type State<C> = <C as TrackingContext>::State;
type Payload<C> = <C as TrackingContext>::Payload;

type ComputeFn<C, A> = dyn Fn(&Props<C>, Option<&State<C>>, &A) -> Payload<C> + Send + Sync;
type SettledFn<C, A, T, E> =
    dyn Fn(&Props<C>, Option<&State<C>>, &A, Settlement<'_, T, E>) -> Payload<C> + Send + Sync;

/// What gets dispatched for every completed invocation of a tracked method.
///
/// Computing functions run lazily, once per invocation, at dispatch time.
pub enum TrackingData<C: TrackingContext, A, T, E> {
    /// Dispatched as-is. Neither the arguments nor the context are read.
    Fixed(Payload<C>),
    /// `(props, state, args) -> payload`
    Computed(Box<ComputeFn<C, A>>),
    /// `(props, state, args, settlement) -> payload`
    Settled(Box<SettledFn<C, A, T, E>>),
}

impl<C: TrackingContext, A, T, E> TrackingData<C, A, T, E> {
    pub fn fixed(payload: Payload<C>) -> Self {
        TrackingData::Fixed(payload)
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Props<C>, Option<&State<C>>, &A) -> Payload<C> + Send + Sync + 'static,
    {
        TrackingData::Computed(Box::new(f))
    }

    pub fn settled<F>(f: F) -> Self
    where
        F: Fn(&Props<C>, Option<&State<C>>, &A, Settlement<'_, T, E>) -> Payload<C>
            + Send
            + Sync
            + 'static,
    {
        TrackingData::Settled(Box::new(f))
    }

    /// Keeps a copy of the call arguments for the computing function.
    /// Fixed payloads never look at the arguments, so nothing is cloned.
    pub(crate) fn capture(&self, args: &A) -> Option<A>
    where
        A: Clone,
    {
        match self {
            TrackingData::Fixed(_) => None,
            TrackingData::Computed(_) | TrackingData::Settled(_) => Some(args.clone()),
        }
    }

    /// Builds the payload from the context as it is now.
    ///
    /// Returns `None` only when a computing function has no captured
    /// arguments to work with.
    pub(crate) fn payload(
        &self,
        ctx: &C,
        args: Option<&A>,
        settlement: Settlement<'_, T, E>,
    ) -> Option<Payload<C>>
    where
        Payload<C>: Clone,
    {
        match (self, args) {
            (TrackingData::Fixed(payload), _) => Some(payload.clone()),
            (TrackingData::Computed(f), Some(args)) => {
                Some(ctx.observe(|props, state| f(props, state, args)))
            }
            (TrackingData::Settled(f), Some(args)) => {
                Some(ctx.observe(|props, state| f(props, state, args, settlement)))
            }
            (_, None) => None,
        }
    }
}

impl<C, A, T, E> Default for TrackingData<C, A, T, E>
where
    C: TrackingContext,
    Payload<C>: Default,
{
    fn default() -> Self {
        TrackingData::Fixed(<Payload<C> as Default>::default())
    }
}

impl<C, A, T, E> fmt::Debug for TrackingData<C, A, T, E>
where
    C: TrackingContext,
    Payload<C>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingData::Fixed(payload) => f.debug_tuple("Fixed").field(payload).finish(),
            TrackingData::Computed(_) => f.write_str("Computed(..)"),
            TrackingData::Settled(_) => f.write_str("Settled(..)"),
        }
    }
}
