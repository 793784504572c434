//! Outcome - The tri-state result of evaluating an effect.
//!
//! An [`Outcome`] is produced only when an execution strategy evaluates an
//! [`Effect`](crate::Effect); it is never constructed ahead of time by the
//! computation itself. It distinguishes three terminal states:
//!
//! - [`Outcome::Success`]: the computation produced a result.
//! - [`Outcome::Failure`]: the computation failed with an expected, typed
//!   error that recovery combinators can intercept.
//! - [`Outcome::Defect`]: the computation panicked with a value that was not
//!   modeled as a typed error. Defects represent programming or environment
//!   errors and are deliberately not recoverable by ordinary recovery logic.
//!
//! # Examples
//!
//! ```rust
//! use effectio::{Effect, Outcome};
//!
//! let outcome = Effect::<i32, String>::succeed(42).run_sync_outcome();
//! assert_eq!(outcome.success(), Some(42));
//!
//! let outcome = Effect::<i32, String>::fail("boom".to_string()).run_sync_outcome();
//! assert_eq!(outcome.failure(), Some("boom".to_string()));
//! ```

use std::any::Any;

/// The result of evaluating an [`Effect`](crate::Effect).
///
/// Exactly one of three terminal states. An `Outcome` is a plain value:
/// once produced it never changes, and inspecting it has no side effects.
///
/// # Type Parameters
///
/// - `A`: The success value type.
/// - `E`: The typed error value type.
#[derive(Debug)]
pub enum Outcome<A, E> {
    /// The computation produced a result.
    Success(A),
    /// The computation failed with an expected, typed error.
    Failure(E),
    /// The computation panicked with an unexpected value.
    Defect(Defect),
}

impl<A, E> Outcome<A, E> {
    /// Returns `true` if this outcome is a `Success`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::{Effect, Outcome};
    ///
    /// let outcome = Effect::<i32, String>::succeed(1).run_sync_outcome();
    /// assert!(outcome.is_success());
    /// ```
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this outcome is a `Failure`.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns `true` if this outcome is a `Defect`.
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::Defect(_))
    }

    /// Extracts the success value, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::{Effect, Outcome};
    ///
    /// let outcome = Effect::<i32, String>::succeed(42).run_sync_outcome();
    /// assert_eq!(outcome.success(), Some(42));
    /// ```
    pub fn success(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Extracts the typed error value, if any.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Extracts the defect, if any.
    pub fn defect(self) -> Option<Defect> {
        match self {
            Self::Defect(defect) => Some(defect),
            _ => None,
        }
    }

    /// Transforms the success value, leaving `Failure` and `Defect`
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effectio::{Effect, Outcome};
    ///
    /// let outcome = Effect::<i32, String>::succeed(21)
    ///     .run_sync_outcome()
    ///     .map(|x| x * 2);
    /// assert_eq!(outcome.success(), Some(42));
    /// ```
    pub fn map<B, F>(self, function: F) -> Outcome<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Outcome::Success(function(value)),
            Self::Failure(error) => Outcome::Failure(error),
            Self::Defect(defect) => Outcome::Defect(defect),
        }
    }

    /// Transforms the typed error value, leaving `Success` and `Defect`
    /// untouched.
    pub fn map_failure<E2, F>(self, function: F) -> Outcome<A, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(function(error)),
            Self::Defect(defect) => Outcome::Defect(defect),
        }
    }
}

// =============================================================================
// Defect
// =============================================================================

/// An unexpected panic captured during evaluation.
///
/// A `Defect` wraps the raw panic payload. Unlike a typed `Failure`, a
/// defect is not interceptable by
/// [`Effect::catch_all`](crate::Effect::catch_all): unexpected errors
/// should surface rather than be silently swallowed by ordinary recovery
/// logic. Computations that want to treat a panic as a recoverable error
/// must opt in via [`Effect::try_catch`](crate::Effect::try_catch).
///
/// # Examples
///
/// ```rust
/// use effectio::{Effect, Outcome};
///
/// let outcome = Effect::<i32, String>::from_thunk(|| panic!("oops")).run_sync_outcome();
/// let defect = outcome.defect().unwrap();
/// assert_eq!(defect.message(), "oops");
/// ```
pub struct Defect {
    payload: Box<dyn Any + Send>,
}

impl Defect {
    /// Wraps a captured panic payload.
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// The defect raised when a blocking strategy reaches an asynchronous
    /// suspension point.
    pub(crate) fn suspension() -> Self {
        Self {
            payload: Box::new(UnsupportedSuspension),
        }
    }

    /// Extracts a human-readable message from the panic payload.
    ///
    /// Panic payloads are usually a `&str` or a `String`; anything else
    /// yields a generic message.
    pub fn message(&self) -> String {
        if let Some(message) = self.payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = self.payload.downcast_ref::<String>() {
            message.clone()
        } else if let Some(suspension) = self.payload.downcast_ref::<UnsupportedSuspension>() {
            suspension.to_string()
        } else {
            "unknown defect".to_string()
        }
    }

    /// Returns `true` if this defect marks an asynchronous suspension
    /// reached by a blocking strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "async")] {
    /// use effectio::Effect;
    ///
    /// let effect = Effect::<i32, String>::from_async(|| async { 42 });
    /// let defect = effect.run_sync_outcome().defect().unwrap();
    /// assert!(defect.is_suspension());
    /// # }
    /// ```
    pub fn is_suspension(&self) -> bool {
        self.payload.is::<UnsupportedSuspension>()
    }

    /// Attempts to view the panic payload as a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Consumes the defect, returning the raw panic payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl std::fmt::Debug for Defect {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_tuple("Defect").field(&self.message()).finish()
    }
}

impl std::fmt::Display for Defect {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.message())
    }
}

// =============================================================================
// UnsupportedSuspension
// =============================================================================

/// Raised when a blocking strategy reaches an asynchronous suspension point.
///
/// Synchronous strategies cannot wait for asynchronous work, so evaluation
/// fails fast with a defect carrying this marker instead of crashing in an
/// unspecified way.
///
/// # Examples
///
/// ```rust
/// use effectio::UnsupportedSuspension;
///
/// assert_eq!(
///     format!("{}", UnsupportedSuspension),
///     "cannot evaluate an asynchronous computation with a blocking strategy"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedSuspension;

impl std::fmt::Display for UnsupportedSuspension {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "cannot evaluate an asynchronous computation with a blocking strategy"
        )
    }
}

impl std::error::Error for UnsupportedSuspension {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_predicates() {
        let outcome: Outcome<i32, String> = Outcome::Success(42);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert!(!outcome.is_defect());
    }

    #[test]
    fn test_failure_predicates() {
        let outcome: Outcome<i32, String> = Outcome::Failure("boom".to_string());
        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_success_extraction() {
        let outcome: Outcome<i32, String> = Outcome::Success(42);
        assert_eq!(outcome.success(), Some(42));
    }

    #[test]
    fn test_failure_extraction_from_success() {
        let outcome: Outcome<i32, String> = Outcome::Success(42);
        assert_eq!(outcome.failure(), None);
    }

    #[test]
    fn test_map_transforms_success() {
        let outcome: Outcome<i32, String> = Outcome::Success(21);
        assert_eq!(outcome.map(|x| x * 2).success(), Some(42));
    }

    #[test]
    fn test_map_passes_failure_through() {
        let outcome: Outcome<i32, String> = Outcome::Failure("boom".to_string());
        assert_eq!(outcome.map(|x| x * 2).failure(), Some("boom".to_string()));
    }

    #[test]
    fn test_map_failure_transforms_error() {
        let outcome: Outcome<i32, String> = Outcome::Failure("boom".to_string());
        assert_eq!(outcome.map_failure(|e| e.len()).failure(), Some(4));
    }

    #[test]
    fn test_defect_message_from_str_payload() {
        let defect = Defect::from_payload(Box::new("oops"));
        assert_eq!(defect.message(), "oops");
    }

    #[test]
    fn test_defect_message_from_string_payload() {
        let defect = Defect::from_payload(Box::new("oops".to_string()));
        assert_eq!(defect.message(), "oops");
    }

    #[test]
    fn test_defect_message_from_opaque_payload() {
        let defect = Defect::from_payload(Box::new(42_u8));
        assert_eq!(defect.message(), "unknown defect");
    }

    #[test]
    fn test_suspension_defect_is_marked() {
        let defect = Defect::suspension();
        assert!(defect.is_suspension());
        assert!(
            defect
                .downcast_ref::<UnsupportedSuspension>()
                .is_some()
        );
    }

    #[test]
    fn test_defect_downcast_preserves_payload() {
        let defect = Defect::from_payload(Box::new(7_i64));
        assert_eq!(defect.downcast_ref::<i64>(), Some(&7));
    }
}
