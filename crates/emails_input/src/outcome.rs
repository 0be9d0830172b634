//! Success/failure value for expected validation results.
//!
//! Validation never raises: a rejected address is an ordinary
//! [`Outcome::fail`] that callers branch on. Only misuse of the type itself
//! (a failure without a message, unwrapping a failure) panics.

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T>(Inner<T>);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Inner<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn succeed(value: T) -> Self {
        Self(Inner::Success(value))
    }

    /// # Panics
    ///
    /// If `error` is empty: a failure must say why.
    pub fn fail(error: impl Into<String>) -> Self {
        let error = error.into();
        assert!(!error.is_empty(), "an outcome failure must contain a message");
        Self(Inner::Failure(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.0, Inner::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match &self.0 {
            Inner::Success(value) => Some(value),
            Inner::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.0 {
            Inner::Success(_) => None,
            Inner::Failure(error) => Some(error),
        }
    }

    /// # Panics
    ///
    /// On a failure.
    pub fn unwrap(self) -> T {
        match self.0 {
            Inner::Success(value) => value,
            Inner::Failure(error) => {
                panic!("Outcome has failed, can not retrieve value: {error}")
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.0 {
            Inner::Success(value) => Outcome(Inner::Success(f(value))),
            Inner::Failure(error) => Outcome(Inner::Failure(error)),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        self.into()
    }
}

impl<T> From<Outcome<T>> for Result<T, String> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome.0 {
            Inner::Success(value) => Ok(value),
            Inner::Failure(error) => Err(error),
        }
    }
}
