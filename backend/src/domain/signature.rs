//! Signature aggregate and its validated field types.
//!
//! A signature records one person's assent to a campaign and is immutable
//! once stored. At most one signature exists per (campaign, signer name)
//! pair; the persistence adapter enforces that atomically.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CampaignId;

/// Maximum accepted signer name length in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// Validation errors for signature field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureValidationError {
    /// Signature identifiers are database-generated and always positive.
    IdNotPositive,
    /// Signer name was blank once trimmed.
    EmptyName,
    /// Signer name exceeded [`MAX_NAME_CHARS`].
    NameTooLong,
}

impl fmt::Display for SignatureValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdNotPositive => write!(f, "signature id must be positive"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong => {
                write!(f, "name must be at most {MAX_NAME_CHARS} characters")
            }
        }
    }
}

impl std::error::Error for SignatureValidationError {}

/// Identifier of a stored signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureId(i64);

impl SignatureId {
    /// Construct a signature id, rejecting non-positive values.
    pub fn new(value: i64) -> Result<Self, SignatureValidationError> {
        if value <= 0 {
            return Err(SignatureValidationError::IdNotPositive);
        }
        Ok(Self(value))
    }

    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Signer name, trimmed and bounded.
///
/// Names deduplicate signatures within one campaign, so the trimmed form is
/// the canonical identity used by the uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerName(String);

impl SignerName {
    /// Construct a signer name from raw input, trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use petition_backend::domain::SignerName;
    ///
    /// let name = SignerName::new(" Alice ").expect("valid name");
    /// assert_eq!(name.as_str(), "Alice");
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, SignatureValidationError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(SignatureValidationError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(SignatureValidationError::NameTooLong);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the name text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SignerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored signature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Database-generated identifier.
    pub id: SignatureId,
    /// Campaign this signature belongs to.
    pub campaign_id: CampaignId,
    /// Name of the signer; unique within the campaign.
    pub name: SignerName,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Creation timestamp, set by the database.
    pub created_at: DateTime<Utc>,
}

/// A signature ready for insertion; the database assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSignature {
    /// Campaign this signature belongs to.
    pub campaign_id: CampaignId,
    /// Name of the signer; unique within the campaign.
    pub name: SignerName,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn name_rejects_blank(#[case] raw: &str) {
        let err = SignerName::new(raw).expect_err("blank names must fail");
        assert_eq!(err, SignatureValidationError::EmptyName);
    }

    #[rstest]
    fn name_rejects_overlong_input() {
        let raw = "n".repeat(MAX_NAME_CHARS + 1);
        let err = SignerName::new(raw).expect_err("overlong names must fail");
        assert_eq!(err, SignatureValidationError::NameTooLong);
    }

    #[rstest]
    fn names_deduplicate_on_trimmed_form() {
        let padded = SignerName::new("  Alice  ").expect("valid name");
        let plain = SignerName::new("Alice").expect("valid name");
        assert_eq!(padded, plain);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn signature_id_rejects_non_positive(#[case] raw: i64) {
        let err = SignatureId::new(raw).expect_err("non-positive ids must fail");
        assert_eq!(err, SignatureValidationError::IdNotPositive);
    }
}
