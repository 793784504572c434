//! # effectio
//!
//! A minimal functional effect library providing deferred computations,
//! typed failures, and pluggable execution strategies.
//!
//! ## Overview
//!
//! An [`Effect<A, E>`](Effect) is an immutable description of a computation
//! that may succeed with an `A` or fail with a typed error `E`. Building
//! and composing effects performs no work; evaluation happens only when the
//! description is handed to exactly one execution strategy, which produces
//! an [`Outcome`] (success, typed failure, or unexpected defect) and
//! converts it into the caller's idiom.
//!
//! - **Describe**: [`Effect::succeed`], [`Effect::fail`],
//!   [`Effect::from_thunk`], [`Effect::try_catch`], and — with the `async`
//!   feature — [`Effect::from_async`] / [`Effect::from_future`].
//! - **Compose**: [`Effect::map`], [`Effect::flat_map`],
//!   [`Effect::catch_all`], [`Effect::map_error`].
//! - **Run**: one of the four strategies below.
//!
//! ## Execution Strategies
//!
//! The four run strategies share one evaluator pair and therefore always
//! agree on how a tree classifies; they differ only in synchrony and
//! delivery:
//!
//! - [`Effect::run_sync`]: blocks; returns the value, unwinds on failure.
//! - [`Effect::run_sync_outcome`]: blocks; returns the [`Outcome`] as data.
//! - [`Effect::run_future`]: non-blocking; resolves the value, panics in
//!   the future on failure (`async` feature).
//! - [`Effect::run_future_outcome`]: non-blocking; resolves the
//!   [`Outcome`] as data (`async` feature).
//!
//! ## Feature Flags
//!
//! - `async` (default): asynchronous thunks and the two future strategies.
//!
//! ## Example
//!
//! ```rust
//! use effectio::{Effect, Outcome};
//!
//! let effect = Effect::<i32, String>::succeed(2)
//!     .flat_map(|x| Effect::succeed(x + 1))
//!     .catch_all(|error: String| Effect::<i32, String>::fail(error));
//!
//! match effect.run_sync_outcome() {
//!     Outcome::Success(value) => assert_eq!(value, 3),
//!     Outcome::Failure(error) => unreachable!("unexpected failure: {error}"),
//!     Outcome::Defect(defect) => unreachable!("unexpected defect: {defect}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the public surface of the crate.
///
/// # Usage
///
/// ```rust
/// use effectio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Defect, Effect, Outcome, UnsupportedSuspension};
}

mod effect;
mod outcome;
mod runtime;

pub use effect::Effect;
pub use outcome::{Defect, Outcome, UnsupportedSuspension};
