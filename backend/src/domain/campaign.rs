//! Campaign aggregate and its validated field types.
//!
//! A campaign is created once and never mutated afterwards, so the aggregate
//! is a plain immutable record; invariants live in the field newtypes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum accepted campaign title length in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Validation errors for campaign field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignValidationError {
    /// Campaign identifiers are database-generated and always positive.
    IdNotPositive,
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Title exceeded [`MAX_TITLE_CHARS`].
    TitleTooLong,
    /// Rendered statement was blank.
    EmptyStatement,
    /// Goal must target at least one signature.
    GoalNotPositive,
}

impl fmt::Display for CampaignValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdNotPositive => write!(f, "campaign id must be positive"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong => {
                write!(f, "title must be at most {MAX_TITLE_CHARS} characters")
            }
            Self::EmptyStatement => write!(f, "statement must not be empty"),
            Self::GoalNotPositive => write!(f, "goal must be at least 1"),
        }
    }
}

impl std::error::Error for CampaignValidationError {}

/// Identifier of a stored campaign.
///
/// ## Invariants
/// - Always positive; the database generates these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(i64);

impl CampaignId {
    /// Construct a campaign id, rejecting non-positive values.
    pub fn new(value: i64) -> Result<Self, CampaignValidationError> {
        if value <= 0 {
            return Err(CampaignValidationError::IdNotPositive);
        }
        Ok(Self(value))
    }

    /// The raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Canonical detail-page location for this campaign.
    ///
    /// # Examples
    /// ```
    /// use petition_backend::domain::CampaignId;
    ///
    /// let id = CampaignId::new(5).expect("valid id");
    /// assert_eq!(id.location(), "/campaign/5");
    /// ```
    pub fn location(self) -> String {
        format!("/campaign/{}", self.0)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Campaign title, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Construct a title from raw input, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, CampaignValidationError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(CampaignValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_CHARS {
            return Err(CampaignValidationError::TitleTooLong);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the title text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered campaign statement markup.
///
/// Holds the HTML produced by the Markdown renderer, never the raw source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    /// Wrap rendered markup, rejecting blank output.
    pub fn new(rendered: impl Into<String>) -> Result<Self, CampaignValidationError> {
        let rendered = rendered.into();
        if rendered.trim().is_empty() {
            return Err(CampaignValidationError::EmptyStatement);
        }
        Ok(Self(rendered))
    }

    /// Borrow the rendered markup.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Signature target for a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal(i64);

impl Goal {
    /// Construct a goal, rejecting non-positive targets.
    pub fn new(value: i64) -> Result<Self, CampaignValidationError> {
        if value <= 0 {
            return Err(CampaignValidationError::GoalNotPositive);
        }
        Ok(Self(value))
    }

    /// The raw target count.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored campaign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Database-generated identifier.
    pub id: CampaignId,
    /// Display title.
    pub title: Title,
    /// Rendered statement markup.
    pub statement: Statement,
    /// Signature target count.
    pub goal: Goal,
    /// Creator of the campaign.
    pub create_user_id: UserId,
    /// Creation timestamp, set by the database.
    pub created_at: DateTime<Utc>,
}

/// A campaign ready for insertion; the database assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaign {
    /// Display title.
    pub title: Title,
    /// Rendered statement markup.
    pub statement: Statement,
    /// Signature target count.
    pub goal: Goal,
    /// Creator of the campaign.
    pub create_user_id: UserId,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn campaign_id_rejects_non_positive(#[case] raw: i64) {
        let err = CampaignId::new(raw).expect_err("non-positive ids must fail");
        assert_eq!(err, CampaignValidationError::IdNotPositive);
    }

    #[rstest]
    fn campaign_id_location_is_canonical() {
        let id = CampaignId::new(17).expect("valid id");
        assert_eq!(id.location(), "/campaign/17");
    }

    #[rstest]
    #[case("", CampaignValidationError::EmptyTitle)]
    #[case("   ", CampaignValidationError::EmptyTitle)]
    fn title_rejects_blank(#[case] raw: &str, #[case] expected: CampaignValidationError) {
        let err = Title::new(raw).expect_err("blank titles must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn title_rejects_overlong_input() {
        let raw = "t".repeat(MAX_TITLE_CHARS + 1);
        let err = Title::new(raw).expect_err("overlong titles must fail");
        assert_eq!(err, CampaignValidationError::TitleTooLong);
    }

    #[rstest]
    fn title_trims_surrounding_whitespace() {
        let title = Title::new("  Save the library  ").expect("valid title");
        assert_eq!(title.as_str(), "Save the library");
    }

    #[rstest]
    #[case(0)]
    #[case(-100)]
    fn goal_rejects_non_positive(#[case] raw: i64) {
        let err = Goal::new(raw).expect_err("non-positive goals must fail");
        assert_eq!(err, CampaignValidationError::GoalNotPositive);
    }

    #[rstest]
    fn statement_rejects_blank_markup() {
        let err = Statement::new("  \n ").expect_err("blank markup must fail");
        assert_eq!(err, CampaignValidationError::EmptyStatement);
    }
}
