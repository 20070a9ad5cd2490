//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Petition campaigns.
    ///
    /// The `statement` column stores rendered HTML, never Markdown source.
    campaigns (id) {
        /// Primary key: database-generated identity.
        id -> Int8,
        /// Display title (max 100 characters).
        title -> Varchar,
        /// Rendered statement markup.
        statement -> Text,
        /// Signature target count.
        goal -> Int8,
        /// Creator's user id.
        create_user_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Signatures collected for campaigns.
    ///
    /// A unique index on `(campaign_id, name)` backstops the duplicate
    /// check performed inside the recording transaction.
    signatures (id) {
        /// Primary key: database-generated identity.
        id -> Int8,
        /// Campaign the signature belongs to.
        campaign_id -> Int8,
        /// Signer name (max 255 characters); unique per campaign.
        name -> Varchar,
        /// Optional free-text comment.
        signature_comment -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(signatures -> campaigns (campaign_id));
diesel::allow_tables_to_appear_in_same_query!(campaigns, signatures);
