//! View names, view models, and workflow response values.
//!
//! The workflow decides *what* to show; rendering is delegated to the
//! [`ViewRenderer`](super::ports::ViewRenderer) port. Each view model
//! serialises into a mapping of named values so any template backend can
//! consume it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::forms::{CampaignCreateForm, FieldErrors, SignatureForm};
use super::Campaign;

/// Identifies a template known to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    /// Campaign detail page with the signature form.
    CampaignDetail,
    /// Campaign creation form page.
    CampaignNew,
    /// List of the current user's campaigns.
    CampaignList,
}

impl ViewName {
    /// Template path understood by the renderer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CampaignDetail => "campaign/index",
            Self::CampaignNew => "campaign/new",
            Self::CampaignList => "campaign/list",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of named values handed to the renderer.
pub type ViewContext = Map<String, Value>;

/// One-shot status text attached to a redirect and shown on the next render
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMessage(String);

/// Validation error for [`FlashMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFlashError;

impl fmt::Display for EmptyFlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flash message must not be empty")
    }
}

impl std::error::Error for EmptyFlashError {}

impl FlashMessage {
    /// Wrap status text, rejecting blank messages.
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyFlashError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EmptyFlashError);
        }
        Ok(Self(text))
    }

    /// Borrow the message text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper, returning the text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FlashMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display projection of a stored campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    /// Campaign identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Rendered statement markup.
    pub statement: String,
    /// Signature target.
    pub goal: i64,
    /// Creator's user id.
    pub create_user_id: i64,
}

impl From<&Campaign> for CampaignView {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.get(),
            title: campaign.title.as_str().to_owned(),
            statement: campaign.statement.as_str().to_owned(),
            goal: campaign.goal.get(),
            create_user_id: campaign.create_user_id.get(),
        }
    }
}

fn insert_value(context: &mut ViewContext, key: &str, value: impl Serialize) {
    // View models are plain data; serialisation cannot fail for them.
    if let Ok(value) = serde_json::to_value(value) {
        context.insert(key.to_owned(), value);
    }
}

/// Context for the campaign detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDetailContext {
    /// The campaign on display.
    pub campaign: CampaignView,
    /// Current total of stored signatures for the campaign.
    pub signature_count: i64,
    /// Signature form, preserving prior input after a failed submission.
    pub signature: SignatureForm,
    /// Field errors from the last submission, empty otherwise.
    pub errors: FieldErrors,
    /// Status text consumed from the flash, if any.
    pub message: Option<String>,
}

impl CampaignDetailContext {
    /// Flatten into the named-value mapping the renderer consumes.
    pub fn into_context(self) -> ViewContext {
        let mut context = ViewContext::new();
        insert_value(&mut context, "campaign", &self.campaign);
        insert_value(&mut context, "signatureCount", self.signature_count);
        insert_value(&mut context, "signature", &self.signature);
        insert_value(&mut context, "errors", &self.errors);
        insert_value(&mut context, "message", &self.message);
        context
    }
}

/// Context for the campaign creation form view.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignNewContext {
    /// Creation form, preserving prior input after a failed submission.
    pub form: CampaignCreateForm,
    /// Field errors from the last submission, empty otherwise.
    pub errors: FieldErrors,
}

impl CampaignNewContext {
    /// Flatten into the named-value mapping the renderer consumes.
    pub fn into_context(self) -> ViewContext {
        let mut context = ViewContext::new();
        insert_value(&mut context, "form", &self.form);
        insert_value(&mut context, "errors", &self.errors);
        context
    }
}

/// Context for the campaign list view.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignListContext {
    /// Campaigns created by the current user, possibly empty.
    pub campaigns: Vec<CampaignView>,
}

impl CampaignListContext {
    /// Flatten into the named-value mapping the renderer consumes.
    pub fn into_context(self) -> ViewContext {
        let mut context = ViewContext::new();
        insert_value(&mut context, "campaigns", &self.campaigns);
        context
    }
}

/// Outcome of a workflow operation, chosen by the workflow itself.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResponse {
    /// A rendered page to return with status 200.
    Page {
        /// The view that was rendered.
        view: ViewName,
        /// Rendered body produced by the renderer port.
        body: String,
    },
    /// An HTTP 303 redirect, optionally carrying a one-shot flash message.
    SeeOther {
        /// Target location, e.g. `/campaign/5`.
        location: String,
        /// Flash message for the next render.
        flash: Option<FlashMessage>,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn flash_rejects_blank_text() {
        assert_eq!(FlashMessage::new("  "), Err(EmptyFlashError));
    }

    #[rstest]
    fn view_names_map_to_template_paths() {
        assert_eq!(ViewName::CampaignDetail.as_str(), "campaign/index");
        assert_eq!(ViewName::CampaignNew.as_str(), "campaign/new");
        assert_eq!(ViewName::CampaignList.as_str(), "campaign/list");
    }

    #[rstest]
    fn detail_context_exposes_named_values() {
        let context = CampaignDetailContext {
            campaign: CampaignView {
                id: 5,
                title: "T".to_owned(),
                statement: "<p>S</p>".to_owned(),
                goal: 10,
                create_user_id: 7,
            },
            signature_count: 3,
            signature: SignatureForm::default(),
            errors: FieldErrors::new(),
            message: Some("thanks".to_owned()),
        };

        let map = context.into_context();
        assert_eq!(
            map.get("signatureCount").and_then(Value::as_i64),
            Some(3)
        );
        assert_eq!(
            map.get("message").and_then(Value::as_str),
            Some("thanks")
        );
        assert_eq!(
            map.get("campaign")
                .and_then(|c| c.get("title"))
                .and_then(Value::as_str),
            Some("T")
        );
    }
}
