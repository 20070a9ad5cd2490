//! Submitted forms and their validation.
//!
//! Forms keep the raw submitted strings so a failed submission re-renders
//! with the user's input intact. `validate` either produces a typed value
//! set or a field-keyed [`FieldErrors`] collection; nothing half-validated
//! ever reaches the workflow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::campaign::{CampaignValidationError, Goal, Title};
use super::signature::{SignatureValidationError, SignerName};
use super::CampaignId;

/// Maximum accepted comment length in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Field-keyed validation error messages, ordered by field name.
///
/// # Examples
/// ```
/// use petition_backend::domain::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("name", "name must not be empty");
/// assert!(errors.has("name"));
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Whether any field carries an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given field carries an error.
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded against the given field.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }
}

fn parse_campaign_id(raw: &str) -> Result<CampaignId, String> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| "campaign id must be numeric".to_owned())?;
    CampaignId::new(id).map_err(|err| err.to_string())
}

/// URL-parameter form carrying a campaign identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignForm {
    /// Raw campaign identifier, absent when the parameter was missing.
    pub campaign_id: Option<String>,
}

impl CampaignForm {
    /// Build a form from a raw identifier parameter.
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: Some(campaign_id.into()),
        }
    }

    /// Validate the identifier, producing the typed id or field errors.
    pub fn validate(&self) -> Result<CampaignId, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = match self.campaign_id.as_deref() {
            None | Some("") => {
                errors.add("campaignId", "campaign id is required");
                None
            }
            Some(raw) => match parse_campaign_id(raw) {
                Ok(id) => Some(id),
                Err(message) => {
                    errors.add("campaignId", message);
                    None
                }
            },
        };
        match (id, errors.is_empty()) {
            (Some(id), true) => Ok(id),
            _ => Err(errors),
        }
    }
}

/// Validated signature submission values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignature {
    /// Campaign the signature targets.
    pub campaign_id: CampaignId,
    /// Canonical signer name.
    pub name: SignerName,
    /// Optional trimmed comment; blank input collapses to `None`.
    pub comment: Option<String>,
}

/// Signature submission form.
///
/// Raw values survive validation failure so the detail view re-renders with
/// the user's own input alongside the field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureForm {
    /// Raw campaign identifier.
    pub campaign_id: String,
    /// Raw signer name.
    pub name: String,
    /// Raw comment text.
    pub comment: String,
}

impl SignatureForm {
    /// A fresh, empty form bound to a campaign.
    pub fn empty_for(campaign_id: CampaignId) -> Self {
        Self {
            campaign_id: campaign_id.to_string(),
            name: String::new(),
            comment: String::new(),
        }
    }

    /// Validate the submission, producing typed values or field errors.
    pub fn validate(&self) -> Result<ValidSignature, FieldErrors> {
        let mut errors = FieldErrors::new();

        let campaign_id = match parse_campaign_id(&self.campaign_id) {
            Ok(id) => Some(id),
            Err(message) => {
                errors.add("campaignId", message);
                None
            }
        };

        let name = match SignerName::new(self.name.clone()) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.add("name", map_signature_error(&err));
                None
            }
        };

        let comment = self.comment.trim();
        if comment.chars().count() > MAX_COMMENT_CHARS {
            errors.add(
                "comment",
                format!("comment must be at most {MAX_COMMENT_CHARS} characters"),
            );
        }

        match (campaign_id, name, errors.is_empty()) {
            (Some(campaign_id), Some(name), true) => Ok(ValidSignature {
                campaign_id,
                name,
                comment: (!comment.is_empty()).then(|| comment.to_owned()),
            }),
            _ => Err(errors),
        }
    }
}

fn map_signature_error(err: &SignatureValidationError) -> String {
    err.to_string()
}

/// Validated campaign creation values.
///
/// The statement here is still Markdown source; the workflow renders it
/// before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCampaignCreate {
    /// Campaign title.
    pub title: Title,
    /// Markdown source of the statement.
    pub statement_source: String,
    /// Signature target.
    pub goal: Goal,
}

/// Campaign creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignCreateForm {
    /// Raw title.
    pub title: String,
    /// Raw Markdown statement source.
    pub statement: String,
    /// Raw goal text; must parse as a positive integer.
    pub goal: String,
}

impl CampaignCreateForm {
    /// Validate the submission, producing typed values or field errors.
    pub fn validate(&self) -> Result<ValidCampaignCreate, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = match Title::new(self.title.clone()) {
            Ok(title) => Some(title),
            Err(err) => {
                errors.add("title", map_campaign_error(&err));
                None
            }
        };

        let statement = self.statement.trim();
        if statement.is_empty() {
            errors.add("statement", "statement must not be empty");
        }

        let goal = match self.goal.trim().parse::<i64>() {
            Ok(value) => match Goal::new(value) {
                Ok(goal) => Some(goal),
                Err(err) => {
                    errors.add("goal", map_campaign_error(&err));
                    None
                }
            },
            Err(_) => {
                errors.add("goal", "goal must be a whole number");
                None
            }
        };

        match (title, goal, errors.is_empty()) {
            (Some(title), Some(goal), true) => Ok(ValidCampaignCreate {
                title,
                statement_source: statement.to_owned(),
                goal,
            }),
            _ => Err(errors),
        }
    }
}

fn map_campaign_error(err: &CampaignValidationError) -> String {
    err.to_string()
}
