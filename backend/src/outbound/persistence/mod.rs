//! Diesel/PostgreSQL persistence adapters.
//!
//! Adapters implement the domain repository ports and keep every Diesel
//! type (rows, schema, errors) private to this module tree.

mod diesel_campaign_repository;
mod diesel_error_mapping;
mod diesel_signature_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_campaign_repository::DieselCampaignRepository;
pub use diesel_signature_repository::DieselSignatureRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
