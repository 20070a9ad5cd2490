//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the workflow and its ports, staying testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CampaignRepository, MarkdownRenderer, SignatureRepository, ViewRenderer,
};
use crate::domain::CampaignWorkflow;

/// Parameter object bundling the port implementations behind the workflow.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Campaign persistence adapter.
    pub campaigns: Arc<dyn CampaignRepository>,
    /// Signature persistence adapter.
    pub signatures: Arc<dyn SignatureRepository>,
    /// Markdown rendering adapter.
    pub markdown: Arc<dyn MarkdownRenderer>,
    /// View rendering adapter.
    pub renderer: Arc<dyn ViewRenderer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The campaign workflow serving every handler.
    pub workflow: CampaignWorkflow,
}

impl HttpState {
    /// Construct state around an already-built workflow.
    pub fn new(workflow: CampaignWorkflow) -> Self {
        Self { workflow }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            campaigns,
            signatures,
            markdown,
            renderer,
        } = ports;
        Self::new(CampaignWorkflow::new(campaigns, signatures, markdown, renderer))
    }
}
