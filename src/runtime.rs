//! Execution strategies - Converting a described effect into an observed
//! result.
//!
//! A described [`Effect`] does nothing until handed to exactly one run
//! strategy. All four strategies drive the same trampoline evaluators, so
//! they always agree on whether a given tree is a success, a typed failure,
//! or a defect; they differ only in synchrony and in how the terminal
//! [`Outcome`] is delivered:
//!
//! | Strategy | Blocking | Success | Failure | Defect |
//! |---|---|---|---|---|
//! | [`run_sync`](Effect::run_sync) | yes | returns the value | unwinds with the error value | re-raises the panic payload |
//! | [`run_sync_outcome`](Effect::run_sync_outcome) | yes | `Outcome::Success` | `Outcome::Failure` | `Outcome::Defect` |
//! | [`run_future`](Effect::run_future) | no | resolves the value | panics in the future | re-raises in the future |
//! | [`run_future_outcome`](Effect::run_future_outcome) | no | `Outcome::Success` | `Outcome::Failure` | `Outcome::Defect` |
//!
//! The throwing strategies trade the error's static type for exception-style
//! control flow; the outcome strategies keep the failure/defect distinction
//! as data for the caller to branch on.
//!
//! Blocking strategies cannot wait for asynchronous work: reaching a
//! suspension point fails fast with a defect carrying
//! [`UnsupportedSuspension`](crate::UnsupportedSuspension).

use std::panic::{AssertUnwindSafe, catch_unwind, panic_any, resume_unwind};

#[cfg(feature = "async")]
use futures::FutureExt;

use crate::effect::{Effect, Node};
use crate::outcome::{Defect, Outcome};

/// Evaluates an effect tree to a terminal outcome, blocking the caller.
///
/// Each synchronous step runs under `catch_unwind`, so panics classify as
/// defects. Reaching a suspension point yields a suspension defect.
fn evaluate<A, E>(mut effect: Effect<A, E>) -> Outcome<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    loop {
        match effect.node {
            Node::Done(outcome) => return outcome,
            Node::Step(step) => match catch_unwind(AssertUnwindSafe(move || step())) {
                Ok(next) => effect = next,
                Err(payload) => return Outcome::Defect(Defect::from_payload(payload)),
            },
            #[cfg(feature = "async")]
            Node::Suspend(_) => return Outcome::Defect(Defect::suspension()),
        }
    }
}

/// Evaluates an effect tree to a terminal outcome, awaiting suspensions.
#[cfg(feature = "async")]
async fn evaluate_async<A, E>(mut effect: Effect<A, E>) -> Outcome<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    loop {
        match effect.node {
            Node::Done(outcome) => return outcome,
            Node::Step(step) => match catch_unwind(AssertUnwindSafe(move || step())) {
                Ok(next) => effect = next,
                Err(payload) => return Outcome::Defect(Defect::from_payload(payload)),
            },
            Node::Suspend(future) => match AssertUnwindSafe(future).catch_unwind().await {
                Ok(next) => effect = next,
                Err(payload) => return Outcome::Defect(Defect::from_payload(payload)),
            },
        }
    }
}

impl<A, E> Effect<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Evaluates the effect, blocking the caller, and returns the success
    /// value.
    ///
    /// This is exception-style delivery: failures do not come back as
    /// values. It is best suited to computations whose success is already
    /// guaranteed, such as initialization at the program's edge.
    ///
    /// # Panics
    ///
    /// - On a typed failure, unwinds via [`std::panic::panic_any`] with the
    ///   raw error value as the payload — unwrapped, so a
    ///   `catch_unwind` caller can recover it by downcast.
    /// - On a defect, re-raises the original panic payload via
    ///   [`std::panic::resume_unwind`].
    /// - On an asynchronous suspension point, unwinds with an
    ///   [`UnsupportedSuspension`](crate::UnsupportedSuspension) payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let value = Effect::<i32, String>::succeed(1).run_sync();
    /// assert_eq!(value, 1);
    /// ```
    pub fn run_sync(self) -> A {
        match evaluate(self) {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => panic_any(error),
            Outcome::Defect(defect) => resume_unwind(defect.into_payload()),
        }
    }

    /// Evaluates the effect, blocking the caller, and returns the terminal
    /// [`Outcome`] without unwinding.
    ///
    /// Failures and defects come back as data, preserving the error's
    /// static type and the failure/defect distinction.
    ///
    /// Reaching an asynchronous suspension point yields
    /// `Outcome::Defect` with a suspension marker rather than blocking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let outcome = Effect::<i32, String>::fail("boom".to_string()).run_sync_outcome();
    /// assert_eq!(outcome.failure(), Some("boom".to_string()));
    /// ```
    pub fn run_sync_outcome(self) -> Outcome<A, E> {
        evaluate(self)
    }

    /// Evaluates the effect without blocking, resolving to the success
    /// value.
    ///
    /// The returned future is the non-blocking analogue of
    /// [`run_sync`](Effect::run_sync): a failure or defect makes the future
    /// panic when polled (a future cannot "reject" in Rust), observable via
    /// [`futures::FutureExt::catch_unwind`] or a task join error.
    ///
    /// # Panics
    ///
    /// The returned future panics on failure (payload: the raw error
    /// value) and on defect (the original panic payload).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let value = Effect::<i32, String>::from_async(|| async { 42 })
    ///     .run_future()
    ///     .await;
    /// assert_eq!(value, 42);
    /// # });
    /// ```
    #[cfg(feature = "async")]
    pub async fn run_future(self) -> A {
        match evaluate_async(self).await {
            Outcome::Success(value) => value,
            Outcome::Failure(error) => panic_any(error),
            Outcome::Defect(defect) => resume_unwind(defect.into_payload()),
        }
    }

    /// Evaluates the effect without blocking, resolving to the terminal
    /// [`Outcome`].
    ///
    /// The future never panics on failure or defect; both are delivered as
    /// data, preserving the failure/defect distinction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let outcome = Effect::<i32, String>::from_async(|| async { 42 })
    ///     .run_future_outcome()
    ///     .await;
    /// assert_eq!(outcome.success(), Some(42));
    /// # });
    /// ```
    #[cfg(feature = "async")]
    pub async fn run_future_outcome(self) -> Outcome<A, E> {
        evaluate_async(self).await
    }
}
