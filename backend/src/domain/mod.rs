//! Domain core: aggregates, forms, ports, and the campaign workflow.
//!
//! Purpose: hold the petition business rules independent of transport and
//! storage. Types are immutable, invariants live in validated constructors,
//! and all I/O crosses the port traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure envelope.
//! - Campaign / Signature aggregates and their validated field newtypes.
//! - Forms (`CampaignForm`, `SignatureForm`, `CampaignCreateForm`) with
//!   field-keyed validation errors.
//! - `CampaignWorkflow` — the orchestrating service.

pub mod campaign;
pub mod error;
pub mod forms;
pub mod ports;
pub mod signature;
pub mod user;
pub mod views;
pub mod workflow;

pub use self::campaign::{
    Campaign, CampaignId, CampaignValidationError, Goal, NewCampaign, Statement, Title,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::forms::{
    CampaignCreateForm, CampaignForm, FieldErrors, SignatureForm, ValidCampaignCreate,
    ValidSignature,
};
pub use self::signature::{
    NewSignature, Signature, SignatureId, SignatureValidationError, SignerName,
};
pub use self::user::{UserId, UserIdValidationError};
pub use self::views::{FlashMessage, ViewName, WorkflowResponse};
pub use self::workflow::CampaignWorkflow;

/// Convenient result alias for workflow and adapter code.
pub type ApiResult<T> = Result<T, Error>;
