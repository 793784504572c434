//! Effect - Deferred computations with typed failures.
//!
//! The [`Effect`] type represents a computation that may succeed with a
//! result or fail with a typed error. Nothing is executed at construction
//! time; an effect is an immutable description, and work happens only when
//! the description is handed to one of the run strategies in
//! [`runtime`](crate#execution-strategies).
//!
//! # Design Philosophy
//!
//! An `Effect` "describes" a computation but doesn't "execute" it.
//! Composition (`map`, `flat_map`, `catch_all`) builds a larger
//! description; execution happens exactly once, at the program's "edge",
//! via a run strategy. Failures raised with [`Effect::fail`] are ordinary
//! data until a strategy decides how to deliver them.
//!
//! # Examples
//!
//! ```rust
//! use effectio::Effect;
//!
//! let effect = Effect::<i32, String>::succeed(10)
//!     .map(|x| x * 2)
//!     .flat_map(|x| Effect::succeed(x + 1));
//! assert_eq!(effect.run_sync(), 21);
//! ```
//!
//! # Deferral
//!
//! ```rust
//! use effectio::Effect;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! let executed = Arc::new(AtomicBool::new(false));
//! let executed_clone = executed.clone();
//!
//! let effect = Effect::<i32, String>::from_thunk(move || {
//!     executed_clone.store(true, Ordering::SeqCst);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.load(Ordering::SeqCst));
//!
//! // Executed now
//! assert_eq!(effect.run_sync(), 42);
//! assert!(executed.load(Ordering::SeqCst));
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

use crate::outcome::{Defect, Outcome};

/// A deferred computation that may succeed with an `A` or fail with an `E`.
///
/// `Effect<A, E>` is an immutable description. Constructing or composing
/// effects performs no work; evaluation happens only inside a run strategy
/// ([`run_sync`](Effect::run_sync),
/// [`run_sync_outcome`](Effect::run_sync_outcome), and — with the `async`
/// feature — [`run_future`](Effect::run_future) and
/// [`run_future_outcome`](Effect::run_future_outcome)). Evaluation consumes
/// the description, so a computation can never be re-entered once it has
/// produced a terminal [`Outcome`].
///
/// # Type Parameters
///
/// - `A`: The success value type.
/// - `E`: The typed error type. Errors are opaque application data, not
///   necessarily anything resembling an exception.
///
/// # Failures and Defects
///
/// A panic inside a thunk built with [`Effect::from_thunk`] is captured by
/// the evaluator and classified as a [`Defect`] — an unexpected error that
/// recovery combinators do not intercept. To treat a panic as an expected,
/// typed failure instead, build the thunk with [`Effect::try_catch`].
pub struct Effect<A, E> {
    pub(crate) node: Node<A, E>,
}

/// The step tree behind an [`Effect`].
///
/// Composition nodes are encoded as synchronous steps that inspect the
/// upstream node and re-wrap the continuation, so the evaluator can run the
/// whole tree as a trampoline without growing the stack per combinator.
pub(crate) enum Node<A, E> {
    /// A computation whose outcome is already known.
    Done(Outcome<A, E>),
    /// A synchronous step yielding the next tree.
    Step(Box<dyn FnOnce() -> Effect<A, E> + Send>),
    /// An asynchronous step yielding the next tree.
    #[cfg(feature = "async")]
    Suspend(Pin<Box<dyn Future<Output = Effect<A, E>> + Send>>),
}

// =============================================================================
// Constructors
// =============================================================================

impl<A, E> Effect<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a pure value in an always-succeeding effect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::succeed(42);
    /// assert_eq!(effect.run_sync(), 42);
    /// ```
    pub fn succeed(value: A) -> Self {
        Self::from_outcome(Outcome::Success(value))
    }

    /// Wraps an error value in an always-failing effect.
    ///
    /// Nothing is raised at construction time; the error is carried as data
    /// until a run strategy decides how to deliver it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::fail("boom".to_string());
    /// assert_eq!(effect.run_sync_outcome().failure(), Some("boom".to_string()));
    /// ```
    pub fn fail(error: E) -> Self {
        Self::from_outcome(Outcome::Failure(error))
    }

    /// Lifts an already-known [`Outcome`] into an effect.
    pub fn from_outcome(outcome: Outcome<A, E>) -> Self {
        Self {
            node: Node::Done(outcome),
        }
    }

    /// Defers a synchronous computation.
    ///
    /// The closure is not invoked until the effect is run. A panic inside
    /// the closure is captured by the evaluator and classified as a
    /// [`Defect`], not a typed failure; use [`Effect::try_catch`] to map a
    /// panic into the error channel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::from_thunk(|| 10 + 20);
    /// assert_eq!(effect.run_sync(), 30);
    /// ```
    pub fn from_thunk<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        Self::step(move || Self::succeed(thunk()))
    }

    /// Defers a synchronous computation, mapping a panic into a typed
    /// failure.
    ///
    /// If the closure panics during evaluation, the captured payload is
    /// handed to `map_error` (wrapped as a [`Defect`] for message and
    /// payload access) and the effect fails with the resulting typed error
    /// instead of producing a defect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::try_catch(
    ///     || panic!("bad input"),
    ///     |defect| format!("parse failed: {}", defect.message()),
    /// );
    /// assert_eq!(
    ///     effect.run_sync_outcome().failure(),
    ///     Some("parse failed: bad input".to_string())
    /// );
    /// ```
    pub fn try_catch<F, M>(thunk: F, map_error: M) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
        M: FnOnce(Defect) -> E + Send + 'static,
    {
        Self::step(move || match catch_unwind(AssertUnwindSafe(move || thunk())) {
            Ok(value) => Self::succeed(value),
            Err(payload) => Self::fail(map_error(Defect::from_payload(payload))),
        })
    }

    /// Builds a deferred step node.
    fn step<F>(step: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self {
            node: Node::Step(Box::new(step)),
        }
    }
}

#[cfg(feature = "async")]
impl<A, E> Effect<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Defers an asynchronous computation.
    ///
    /// The closure is not invoked, and the returned future not polled,
    /// until the effect is run with a future strategy. Blocking strategies
    /// fail fast on asynchronous nodes with a suspension defect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::from_async(|| async { 40 + 2 });
    /// ```
    pub fn from_async<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            node: Node::Suspend(Box::pin(async move { Self::succeed(action().await) })),
        }
    }

    /// Defers an existing future.
    ///
    /// The future should not have been polled yet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::from_future(async { 42 });
    /// ```
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            node: Node::Suspend(Box::pin(async move { Self::succeed(future.await) })),
        }
    }
}

impl<E> Effect<(), E>
where
    E: Send + 'static,
{
    /// Defers printing a line to standard output.
    ///
    /// The message is not printed until the effect is run.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<(), String>::log("Hello, World!");
    /// effect.run_sync(); // Prints "Hello, World!"
    /// ```
    pub fn log<S: std::fmt::Display + Send + 'static>(message: S) -> Self {
        Self::from_thunk(move || {
            println!("{message}");
        })
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<A, E> Effect<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Transforms the success value.
    ///
    /// Failures and defects pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::succeed(21).map(|x| x * 2);
    /// assert_eq!(effect.run_sync(), 42);
    /// ```
    pub fn map<B, F>(self, function: F) -> Effect<B, E>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        self.flat_map(move |value| Effect::succeed(function(value)))
    }

    /// Sequences a dependent computation after this one.
    ///
    /// On success, `function` receives the result and the returned effect
    /// is evaluated in its place. Failures and defects short-circuit:
    /// `function` is never invoked for them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::succeed(2)
    ///     .flat_map(|x| Effect::succeed(x + 1));
    /// assert_eq!(effect.run_sync_outcome().success(), Some(3));
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Effect<B, E>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Effect<B, E> + Send + 'static,
    {
        Effect::step(move || match self.node {
            Node::Done(Outcome::Success(value)) => function(value),
            Node::Done(Outcome::Failure(error)) => Effect::fail(error),
            Node::Done(Outcome::Defect(defect)) => Effect::from_outcome(Outcome::Defect(defect)),
            Node::Step(step) => step().flat_map(function),
            #[cfg(feature = "async")]
            Node::Suspend(future) => Effect {
                node: Node::Suspend(Box::pin(async move { future.await.flat_map(function) })),
            },
        })
    }

    /// Alias for [`flat_map`](Effect::flat_map).
    ///
    /// This is the conventional Rust name for monadic bind.
    pub fn and_then<B, F>(self, function: F) -> Effect<B, E>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Effect<B, E> + Send + 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two effects, discarding the result of the first.
    ///
    /// The first effect still runs for its side effects and its failures
    /// still short-circuit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::succeed(10).then(Effect::succeed(20));
    /// assert_eq!(effect.run_sync(), 20);
    /// ```
    pub fn then<B>(self, next: Effect<B, E>) -> Effect<B, E>
    where
        B: Send + 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Recovers from a typed failure.
    ///
    /// On failure, `recover` receives the error and the returned effect is
    /// evaluated in its place; the replacement owns the error channel from
    /// that point on, so its error type may differ. Successes pass through
    /// without invoking `recover`. Defects also pass through: unexpected
    /// panics are not recoverable here, only typed failures are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::fail("boom".to_string())
    ///     .catch_all(|error| Effect::<i32, String>::succeed(error.len() as i32));
    /// assert_eq!(effect.run_sync(), 4);
    /// ```
    pub fn catch_all<E2, F>(self, recover: F) -> Effect<A, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> Effect<A, E2> + Send + 'static,
    {
        Effect::step(move || match self.node {
            Node::Done(Outcome::Success(value)) => Effect::succeed(value),
            Node::Done(Outcome::Failure(error)) => recover(error),
            Node::Done(Outcome::Defect(defect)) => Effect::from_outcome(Outcome::Defect(defect)),
            Node::Step(step) => step().catch_all(recover),
            #[cfg(feature = "async")]
            Node::Suspend(future) => Effect {
                node: Node::Suspend(Box::pin(async move { future.await.catch_all(recover) })),
            },
        })
    }

    /// Transforms the typed error without recovering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::fail("boom".to_string())
    ///     .map_error(|error| error.len());
    /// assert_eq!(effect.run_sync_outcome().failure(), Some(4));
    /// ```
    pub fn map_error<E2, F>(self, function: F) -> Effect<A, E2>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.catch_all(move |error| Effect::fail(function(error)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_succeed_and_run() {
        let effect = Effect::<i32, String>::succeed(42);
        assert_eq!(effect.run_sync(), 42);
    }

    #[test]
    fn test_fail_carries_error_as_data() {
        let effect = Effect::<i32, String>::fail("boom".to_string());
        assert_eq!(effect.run_sync_outcome().failure(), Some("boom".to_string()));
    }

    #[test]
    fn test_from_thunk_defers_execution() {
        let executed = Arc::new(AtomicBool::new(false));
        let executed_clone = executed.clone();

        let effect = Effect::<i32, String>::from_thunk(move || {
            executed_clone.store(true, Ordering::SeqCst);
            42
        });
        assert!(!executed.load(Ordering::SeqCst));

        assert_eq!(effect.run_sync(), 42);
        assert!(executed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_composition_defers_execution() {
        let executed = Arc::new(AtomicBool::new(false));
        let executed_clone = executed.clone();

        let _composed = Effect::<i32, String>::from_thunk(move || {
            executed_clone.store(true, Ordering::SeqCst);
            1
        })
        .map(|x| x + 1)
        .flat_map(|x| Effect::succeed(x * 2));

        // Composing never evaluates
        assert!(!executed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_map_transforms_success() {
        let effect = Effect::<i32, String>::succeed(21).map(|x| x * 2);
        assert_eq!(effect.run_sync(), 42);
    }

    #[test]
    fn test_flat_map_sequences() {
        let effect = Effect::<i32, String>::succeed(10).flat_map(|x| Effect::succeed(x * 2));
        assert_eq!(effect.run_sync(), 20);
    }

    #[test]
    fn test_and_then_is_flat_map() {
        let effect = Effect::<i32, String>::succeed(10).and_then(|x| Effect::succeed(x + 5));
        assert_eq!(effect.run_sync(), 15);
    }

    #[test]
    fn test_then_discards_first_result() {
        let effect = Effect::<i32, String>::succeed(10).then(Effect::succeed(20));
        assert_eq!(effect.run_sync(), 20);
    }

    #[test]
    fn test_flat_map_short_circuits_on_failure() {
        let touched = Arc::new(AtomicBool::new(false));
        let touched_clone = touched.clone();

        let effect = Effect::<i32, String>::fail("boom".to_string()).flat_map(move |x| {
            touched_clone.store(true, Ordering::SeqCst);
            Effect::succeed(x)
        });

        assert_eq!(effect.run_sync_outcome().failure(), Some("boom".to_string()));
        assert!(!touched.load(Ordering::SeqCst));
    }

    #[test]
    fn test_catch_all_recovers_failure() {
        let effect = Effect::<i32, String>::fail("boom".to_string())
            .catch_all(|error| Effect::<i32, String>::succeed(error.len() as i32));
        assert_eq!(effect.run_sync(), 4);
    }

    #[test]
    fn test_catch_all_skips_success() {
        let touched = Arc::new(AtomicBool::new(false));
        let touched_clone = touched.clone();

        let effect = Effect::<i32, String>::succeed(42).catch_all(move |_| {
            touched_clone.store(true, Ordering::SeqCst);
            Effect::<i32, String>::succeed(0)
        });

        assert_eq!(effect.run_sync(), 42);
        assert!(!touched.load(Ordering::SeqCst));
    }

    #[test]
    fn test_catch_all_does_not_recover_defects() {
        let effect = Effect::<i32, String>::from_thunk(|| panic!("oops"))
            .catch_all(|_| Effect::<i32, String>::succeed(0));
        let outcome = effect.run_sync_outcome();
        assert!(outcome.is_defect());
        assert_eq!(outcome.defect().unwrap().message(), "oops");
    }

    #[test]
    fn test_try_catch_maps_panic_to_failure() {
        let effect = Effect::<i32, String>::try_catch(
            || panic!("bad input"),
            |defect| format!("wrapped: {}", defect.message()),
        );
        assert_eq!(
            effect.run_sync_outcome().failure(),
            Some("wrapped: bad input".to_string())
        );
    }

    #[test]
    fn test_try_catch_passes_success_through() {
        let effect = Effect::<i32, String>::try_catch(|| 42, |defect| defect.message());
        assert_eq!(effect.run_sync(), 42);
    }

    #[test]
    fn test_map_error_transforms_error() {
        let effect = Effect::<i32, String>::fail("boom".to_string()).map_error(|error| error.len());
        assert_eq!(effect.run_sync_outcome().failure(), Some(4));
    }

    #[test]
    fn test_map_error_skips_success() {
        let effect = Effect::<i32, String>::succeed(42).map_error(|error| error.len());
        assert_eq!(effect.run_sync(), 42);
    }
}
