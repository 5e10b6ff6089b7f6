//! Method-level event tracking.
//!
//! `track_event(data).wrap(method)` produces a method that behaves exactly like
//! `method` for its caller and, once the method has completed, dispatches a
//! payload to the sink exposed by the receiving context.
//!
//! # ORDERING INVARIANT
//! A payload is **NEVER** dispatched before the original method has completed:
//! a synchronous return, or the settlement of its suspended result.
//!
//! # TRANSPARENCY INVARIANT
//! The wrapped method returns the original value or failure untouched.
//! Sink failures are logged and never replace the original outcome.

pub mod completion;
pub mod context;
pub mod data;
pub mod recorder;
pub mod sink;
pub mod wrapper;
