//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{campaigns, signatures};

/// Row struct for reading from the campaigns table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampaignRow {
    pub id: i64,
    pub title: String,
    pub statement: String,
    pub goal: i64,
    pub create_user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new campaign records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = campaigns)]
pub(crate) struct NewCampaignRow<'a> {
    pub title: &'a str,
    pub statement: &'a str,
    pub goal: i64,
    pub create_user_id: i64,
}

/// Row struct for reading from the signatures table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = signatures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SignatureRow {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub signature_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new signature records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = signatures)]
pub(crate) struct NewSignatureRow<'a> {
    pub campaign_id: i64,
    pub name: &'a str,
    pub signature_comment: Option<&'a str>,
}
