//! User identity primitives.
//!
//! User accounts themselves are managed by an external collaborator; the
//! workflow only ever sees the authenticated principal's identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// Identifiers are database-generated and always positive.
    NotPositive,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "user id must be positive"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Identifier of a registered user.
///
/// ## Invariants
/// - Always positive; zero and negative values never leave the constructor.
///
/// # Examples
/// ```
/// use petition_backend::domain::UserId;
///
/// let id = UserId::new(7).expect("valid id");
/// assert_eq!(id.get(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Construct a user id, rejecting non-positive values.
    pub fn new(value: i64) -> Result<Self, UserIdValidationError> {
        if value <= 0 {
            return Err(UserIdValidationError::NotPositive);
        }
        Ok(Self(value))
    }

    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn rejects_non_positive_ids(#[case] raw: i64) {
        let err = UserId::new(raw).expect_err("non-positive ids must fail");
        assert_eq!(err, UserIdValidationError::NotPositive);
    }

    #[rstest]
    fn serialises_transparently() {
        let id = UserId::new(42).expect("valid id");
        assert_eq!(serde_json::to_string(&id).expect("serialise"), "42");
    }
}
