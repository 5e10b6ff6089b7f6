use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use super::sink::Tracking;

/// The receiver a tracked method runs against.
///
/// The wrapper reads nothing else from the context: the sink nested under its
/// props, and its props/state when a payload has to be computed. Both are
/// read at dispatch time, after the original method has run.
pub trait TrackingContext: Send + Sync + 'static {
    type Props;
    type State;
    type Payload: Send + 'static;

    /// Runs `f` against the current props and state.
    ///
    /// Implementations may hold locks while `f` runs, so `f` must not call
    /// back into the context mutably.
    fn observe<R>(&self, f: impl FnOnce(&Self::Props, Option<&Self::State>) -> R) -> R;

    /// The sink nested under the props, if one is wired.
    fn tracking(&self) -> Option<Tracking<Self::Payload>>;
}

/// Props that may carry a `tracking` sink.
pub trait ProvidesTracking {
    type Payload: Send + 'static;

    fn tracking(&self) -> Option<&Tracking<Self::Payload>>;
}

/// A host object with mutable props and optional state.
#[derive(Debug)]
pub struct Instance<P, S> {
    props: RwLock<P>,
    state: RwLock<Option<S>>,
}

impl<P, S> Instance<P, S> {
    pub fn new(props: P) -> Self {
        Self {
            props: RwLock::new(props),
            state: RwLock::new(None),
        }
    }

    pub fn with_state(props: P, state: S) -> Self {
        Self {
            props: RwLock::new(props),
            state: RwLock::new(Some(state)),
        }
    }

    pub fn props(&self) -> RwLockReadGuard<'_, P> {
        self.props.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> RwLockReadGuard<'_, Option<S>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_props(&self, props: P) {
        *self.props.write().unwrap_or_else(PoisonError::into_inner) = props;
    }

    pub fn set_state(&self, state: S) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(state);
    }

    /// Mutates the state in place. Does nothing while the state is unset.
    pub fn update_state(&self, f: impl FnOnce(&mut S)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = guard.as_mut() {
            f(state);
        }
    }
}

impl<P, S> TrackingContext for Instance<P, S>
where
    P: ProvidesTracking + Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    type Props = P;
    type State = S;
    type Payload = P::Payload;

    fn observe<R>(&self, f: impl FnOnce(&P, Option<&S>) -> R) -> R {
        let props = self.props();
        let state = self.state();
        f(&props, state.as_ref())
    }

    fn tracking(&self) -> Option<Tracking<P::Payload>> {
        self.props().tracking().cloned()
    }
}
