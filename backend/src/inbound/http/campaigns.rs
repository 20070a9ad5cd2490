//! Campaign HTTP handlers.
//!
//! ```text
//! GET  /campaign/{id}             campaign detail with signature form
//! POST /campaign/{id}/signatures  submit a signature
//! GET  /campaigns/new             campaign creation form
//! POST /campaigns                 create a campaign
//! GET  /campaigns/mine            list the current user's campaigns
//! ```
//!
//! Handlers translate between HTTP and the workflow: forms arrive
//! urlencoded, redirects carry their flash through the session, rendered
//! pages return as HTML bodies.

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{CampaignCreateForm, CampaignForm, SignatureForm, WorkflowResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Turn a workflow response into the HTTP response, storing any flash.
fn respond(session: &SessionContext, response: WorkflowResponse) -> ApiResult<HttpResponse> {
    match response {
        WorkflowResponse::Page { body, .. } => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body)),
        WorkflowResponse::SeeOther { location, flash } => {
            if let Some(flash) = flash {
                session.set_flash(&flash)?;
            }
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish())
        }
    }
}

/// Campaign detail page.
///
/// The identifier stays raw so validation happens in the form, yielding the
/// minimal 400 body instead of the framework's own error page.
#[get("/campaign/{id}")]
pub async fn show_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let flash = session.take_flash()?;
    let form = CampaignForm::new(path.into_inner());
    let response = state.workflow.index(&form, flash).await?;
    respond(&session, response)
}

/// Signature submission body.
#[derive(Debug, Deserialize)]
pub struct SignatureFormData {
    /// Signer name.
    #[serde(default)]
    pub name: String,
    /// Optional comment.
    #[serde(default)]
    pub comment: String,
}

/// Submit a signature for a campaign.
#[post("/campaign/{id}/signatures")]
pub async fn sign(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Form<SignatureFormData>,
) -> ApiResult<HttpResponse> {
    let data = payload.into_inner();
    let form = SignatureForm {
        campaign_id: path.into_inner(),
        name: data.name,
        comment: data.comment,
    };
    let response = state.workflow.sign(form).await?;
    respond(&session, response)
}

/// Campaign creation form page.
#[get("/campaigns/new")]
pub async fn new_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let response = state.workflow.new_campaign()?;
    respond(&session, response)
}

/// Campaign creation body.
#[derive(Debug, Deserialize)]
pub struct CampaignCreateFormData {
    /// Campaign title.
    #[serde(default)]
    pub title: String,
    /// Markdown statement source.
    #[serde(default)]
    pub statement: String,
    /// Signature target as submitted text.
    #[serde(default)]
    pub goal: String,
}

/// Create a campaign owned by the authenticated principal.
#[post("/campaigns")]
pub async fn create_campaign(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Form<CampaignCreateFormData>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let data = payload.into_inner();
    let form = CampaignCreateForm {
        title: data.title,
        statement: data.statement,
        goal: data.goal,
    };
    let response = state.workflow.create(form, principal).await?;
    respond(&session, response)
}

/// List the authenticated principal's campaigns.
#[get("/campaigns/mine")]
pub async fn list_campaigns(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let response = state.workflow.list_campaigns(principal).await?;
    respond(&session, response)
}
