//! Campaign workflow orchestrating the petition use cases.
//!
//! The workflow owns the business rules: duplicate prevention on signing,
//! Markdown rendering before campaign creation, and the choice between
//! re-rendering a view and redirecting with a flash message. All I/O goes
//! through injected ports, and every storage call is bounded by a timeout.
//! Storage failures are never retried; the signature insert is not
//! idempotent.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::forms::{CampaignCreateForm, CampaignForm, FieldErrors, SignatureForm};
use super::ports::{
    CampaignPersistenceError, CampaignRepository, MarkdownRenderer, RenderError,
    SignaturePersistenceError, SignatureOutcome, SignatureRepository, ViewRenderer,
};
use super::views::{
    CampaignDetailContext, CampaignListContext, CampaignNewContext, CampaignView, FlashMessage,
    ViewName, WorkflowResponse,
};
use super::{Campaign, CampaignId, Error, NewCampaign, NewSignature, Statement, UserId};

/// Default upper bound on any single storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Flash text shown after a successful signature.
pub const SIGNED_FLASH: &str = "Thank you for signing!";
/// Flash text shown when the signer already signed this campaign.
pub const ALREADY_SIGNED_FLASH: &str = "You have already signed this campaign.";
/// Flash text shown after creating a campaign.
pub const CREATED_FLASH: &str = "Campaign created.";

/// Orchestrates the campaign use cases against injected collaborators.
#[derive(Clone)]
pub struct CampaignWorkflow {
    campaigns: Arc<dyn CampaignRepository>,
    signatures: Arc<dyn SignatureRepository>,
    markdown: Arc<dyn MarkdownRenderer>,
    renderer: Arc<dyn ViewRenderer>,
    storage_timeout: Duration,
}

fn map_campaign_persistence(error: CampaignPersistenceError) -> Error {
    match error {
        CampaignPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("campaign storage unavailable: {message}"))
        }
        CampaignPersistenceError::Query { message } => {
            Error::internal(format!("campaign storage error: {message}"))
        }
    }
}

fn map_signature_persistence(error: SignaturePersistenceError) -> Error {
    match error {
        SignaturePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("signature storage unavailable: {message}"))
        }
        SignaturePersistenceError::Query { message } => {
            Error::internal(format!("signature storage error: {message}"))
        }
    }
}

fn map_render(error: RenderError) -> Error {
    Error::internal(format!("view rendering failed: {error}"))
}

fn flash(text: &str) -> Result<FlashMessage, Error> {
    FlashMessage::new(text).map_err(|err| Error::internal(err.to_string()))
}

impl CampaignWorkflow {
    /// Construct the workflow with its collaborators.
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        signatures: Arc<dyn SignatureRepository>,
        markdown: Arc<dyn MarkdownRenderer>,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            campaigns,
            signatures,
            markdown,
            renderer,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the storage call timeout.
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Bound a storage future by the configured timeout.
    async fn bounded<T, E, F>(
        &self,
        op: &'static str,
        fut: F,
        map_err: fn(E) -> Error,
    ) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.storage_timeout, fut).await {
            Ok(result) => result.map_err(map_err),
            Err(_) => {
                warn!(operation = op, "storage call timed out");
                Err(Error::service_unavailable(format!("{op} timed out")))
            }
        }
    }

    async fn load_campaign(&self, id: CampaignId) -> Result<Campaign, Error> {
        self.bounded(
            "campaign lookup",
            self.campaigns.find_by_id(id),
            map_campaign_persistence,
        )
        .await?
        .ok_or_else(|| Error::not_found(format!("campaign {id} not found")))
    }

    /// Render the campaign detail view.
    ///
    /// Carries the submission form (with any field errors) so a failed
    /// submission shows the user's own input, and an optional status
    /// message consumed from the flash.
    pub async fn show_campaign(
        &self,
        id: CampaignId,
        form: SignatureForm,
        errors: FieldErrors,
        message: Option<String>,
    ) -> Result<WorkflowResponse, Error> {
        let campaign = self.load_campaign(id).await?;
        let signature_count = self
            .bounded(
                "signature count",
                self.signatures.count_for_campaign(id),
                map_signature_persistence,
            )
            .await?;

        let context = CampaignDetailContext {
            campaign: CampaignView::from(&campaign),
            signature_count,
            signature: form,
            errors,
            message,
        };
        let body = self
            .renderer
            .render(ViewName::CampaignDetail, &context.into_context())
            .map_err(map_render)?;
        Ok(WorkflowResponse::Page {
            view: ViewName::CampaignDetail,
            body,
        })
    }

    /// Campaign detail entry point.
    ///
    /// A malformed or missing identifier yields an invalid-request error
    /// (no render); otherwise the detail view is shown with a fresh form
    /// and the incoming flash as status text.
    pub async fn index(
        &self,
        form: &CampaignForm,
        flash: Option<FlashMessage>,
    ) -> Result<WorkflowResponse, Error> {
        let id = form.validate().map_err(|errors| {
            Error::invalid_request("invalid campaign id").with_details(
                serde_json::json!({ "errors": errors }),
            )
        })?;

        self.show_campaign(
            id,
            SignatureForm::empty_for(id),
            FieldErrors::new(),
            flash.map(FlashMessage::into_inner),
        )
        .await
    }

    /// Signature submission.
    ///
    /// Invalid input re-renders the detail view with field errors and the
    /// prior input (no redirect). A duplicate (campaign, name) pair
    /// redirects with the already-signed flash and inserts nothing; a
    /// fresh pair inserts exactly one row and redirects with the thanks
    /// flash. The duplicate check and insert run atomically inside the
    /// repository.
    pub async fn sign(&self, form: SignatureForm) -> Result<WorkflowResponse, Error> {
        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                // The campaign must still resolve to re-render its page.
                let id = CampaignForm::new(form.campaign_id.clone())
                    .validate()
                    .map_err(|id_errors| {
                        Error::invalid_request("invalid campaign id").with_details(
                            serde_json::json!({ "errors": id_errors }),
                        )
                    })?;
                return self.show_campaign(id, form, errors, None).await;
            }
        };

        let submission = NewSignature {
            campaign_id: valid.campaign_id,
            name: valid.name,
            comment: valid.comment,
        };
        let outcome = self
            .bounded(
                "signature record",
                self.signatures.record(&submission),
                map_signature_persistence,
            )
            .await?;

        let location = valid.campaign_id.location();
        match outcome {
            SignatureOutcome::AlreadySigned => {
                debug!(campaign_id = %valid.campaign_id, "duplicate signature rejected");
                Ok(WorkflowResponse::SeeOther {
                    location,
                    flash: Some(flash(ALREADY_SIGNED_FLASH)?),
                })
            }
            SignatureOutcome::Recorded(signature_id) => {
                debug!(
                    campaign_id = %valid.campaign_id,
                    signature_id = signature_id.get(),
                    "signature recorded"
                );
                Ok(WorkflowResponse::SeeOther {
                    location,
                    flash: Some(flash(SIGNED_FLASH)?),
                })
            }
        }
    }

    /// Campaign creation form. Pure; no side effects.
    pub fn new_campaign(&self) -> Result<WorkflowResponse, Error> {
        let context = CampaignNewContext {
            form: CampaignCreateForm::default(),
            errors: FieldErrors::new(),
        };
        let body = self
            .renderer
            .render(ViewName::CampaignNew, &context.into_context())
            .map_err(map_render)?;
        Ok(WorkflowResponse::Page {
            view: ViewName::CampaignNew,
            body,
        })
    }

    /// Campaign creation.
    ///
    /// Validation failure re-renders the creation form with errors and the
    /// prior input; nothing is inserted. Otherwise the statement Markdown
    /// is rendered, the campaign stored under the acting principal, and
    /// the response redirects to the new campaign's detail page.
    pub async fn create(
        &self,
        form: CampaignCreateForm,
        principal: UserId,
    ) -> Result<WorkflowResponse, Error> {
        let valid = match form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                let context = CampaignNewContext { form, errors };
                let body = self
                    .renderer
                    .render(ViewName::CampaignNew, &context.into_context())
                    .map_err(map_render)?;
                return Ok(WorkflowResponse::Page {
                    view: ViewName::CampaignNew,
                    body,
                });
            }
        };

        let rendered = self
            .markdown
            .render_html(&valid.statement_source)
            .map_err(|err| Error::internal(format!("statement rendering failed: {err}")))?;
        let statement = Statement::new(rendered)
            .map_err(|err| Error::internal(format!("statement rendering failed: {err}")))?;

        let campaign = NewCampaign {
            title: valid.title,
            statement,
            goal: valid.goal,
            create_user_id: principal,
        };
        let id = self
            .bounded(
                "campaign insert",
                self.campaigns.insert(&campaign),
                map_campaign_persistence,
            )
            .await?;
        debug!(campaign_id = %id, user_id = %principal, "campaign created");

        Ok(WorkflowResponse::SeeOther {
            location: id.location(),
            flash: Some(flash(CREATED_FLASH)?),
        })
    }

    /// List the campaigns created by the acting principal, newest first.
    pub async fn list_campaigns(&self, principal: UserId) -> Result<WorkflowResponse, Error> {
        let campaigns = self
            .bounded(
                "campaign list",
                self.campaigns.list_by_creator(principal),
                map_campaign_persistence,
            )
            .await?;

        let context = CampaignListContext {
            campaigns: campaigns.iter().map(CampaignView::from).collect(),
        };
        let body = self
            .renderer
            .render(ViewName::CampaignList, &context.into_context())
            .map_err(map_render)?;
        Ok(WorkflowResponse::Page {
            view: ViewName::CampaignList,
            body,
        })
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
