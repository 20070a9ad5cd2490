//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the workflow expects to interact with driven adapters
//! (database, Markdown renderer, template backend). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::views::{ViewContext, ViewName};
use super::{Campaign, CampaignId, NewCampaign, NewSignature, SignatureId, UserId};

/// Persistence errors raised by [`CampaignRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignPersistenceError {
    /// Database connectivity or transaction failures.
    #[error("campaign repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("campaign repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl CampaignPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`SignatureRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignaturePersistenceError {
    /// Database connectivity or transaction failures.
    #[error("signature repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("signature repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl SignaturePersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Outcome of an atomic signature recording attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureOutcome {
    /// The signature was inserted.
    Recorded(SignatureId),
    /// A signature for this (campaign, name) pair already existed; nothing
    /// was inserted.
    AlreadySigned,
}

/// Persistence port for campaign records.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Insert a campaign, returning the database-generated id.
    async fn insert(&self, campaign: &NewCampaign)
        -> Result<CampaignId, CampaignPersistenceError>;

    /// Fetch a campaign by identifier.
    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignPersistenceError>;

    /// List campaigns created by the given user, newest first.
    async fn list_by_creator(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Campaign>, CampaignPersistenceError>;
}

/// Persistence port for signature records.
#[async_trait]
pub trait SignatureRepository: Send + Sync {
    /// Count stored signatures for a campaign.
    async fn count_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<i64, SignaturePersistenceError>;

    /// Record a signature unless the (campaign, name) pair already exists.
    ///
    /// Implementations MUST bind the existence check and the insert into a
    /// single atomic unit: two concurrent calls with the same pair must
    /// yield one `Recorded` and one `AlreadySigned`, never two inserts.
    async fn record(
        &self,
        signature: &NewSignature,
    ) -> Result<SignatureOutcome, SignaturePersistenceError>;
}

/// Errors raised by the Markdown rendering adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownError {
    /// The renderer failed to produce markup.
    #[error("markdown rendering failed: {message}")]
    Render {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl MarkdownError {
    /// Helper for rendering failures.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

/// Port for turning Markdown source into rich-text markup.
pub trait MarkdownRenderer: Send + Sync {
    /// Render Markdown source to HTML.
    fn render_html(&self, source: &str) -> Result<String, MarkdownError>;
}

/// Errors raised by the view rendering adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The named view is unknown to the backend.
    #[error("unknown view: {view}")]
    UnknownView {
        /// The requested view name.
        view: String,
    },
    /// The backend failed while rendering.
    #[error("view rendering failed: {message}")]
    Backend {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl RenderError {
    /// Helper for unknown view names.
    pub fn unknown_view(view: impl Into<String>) -> Self {
        Self::UnknownView { view: view.into() }
    }

    /// Helper for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port for rendering a named view with a mapping of named values.
///
/// The template backend itself lives outside this crate; adapters only need
/// to honour the name/value contract.
pub trait ViewRenderer: Send + Sync {
    /// Render the named view with the provided values.
    fn render(&self, view: ViewName, context: &ViewContext) -> Result<String, RenderError>;
}

/// Deterministic [`ViewRenderer`] used for wiring and tests.
///
/// Emits a JSON envelope of the view name and context so tests can assert on
/// exactly what the workflow handed to the presentation layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureViewRenderer;

impl ViewRenderer for FixtureViewRenderer {
    fn render(&self, view: ViewName, context: &ViewContext) -> Result<String, RenderError> {
        let envelope = serde_json::json!({
            "view": view.as_str(),
            "context": context,
        });
        serde_json::to_string(&envelope).map_err(|err| RenderError::backend(err.to_string()))
    }
}
