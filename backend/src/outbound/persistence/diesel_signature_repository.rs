//! PostgreSQL-backed `SignatureRepository` implementation using Diesel ORM.
//!
//! The duplicate check and the insert run inside one transaction so two
//! concurrent submissions with the same (campaign, name) pair cannot both
//! insert. The unique index on `(campaign_id, name)` is the last line of
//! defence: a unique violation raised at commit time is reported as the
//! already-signed outcome, not an error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SignatureOutcome, SignaturePersistenceError, SignatureRepository};
use crate::domain::{CampaignId, NewSignature, SignatureId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewSignatureRow;
use super::pool::{DbPool, PoolError};
use super::schema::signatures;

/// Diesel-backed implementation of the signature repository port.
#[derive(Clone)]
pub struct DieselSignatureRepository {
    pool: DbPool,
}

impl DieselSignatureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SignaturePersistenceError {
    map_basic_pool_error(error, SignaturePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SignaturePersistenceError {
    map_basic_diesel_error(
        error,
        SignaturePersistenceError::query,
        SignaturePersistenceError::connection,
    )
}

fn is_unique_violation(error: &diesel::result::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[async_trait]
impl SignatureRepository for DieselSignatureRepository {
    async fn count_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<i64, SignaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        signatures::table
            .filter(signatures::campaign_id.eq(campaign_id.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn record(
        &self,
        signature: &NewSignature,
    ) -> Result<SignatureOutcome, SignaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let campaign_id = signature.campaign_id.get();
        let name = signature.name.as_str();
        let comment = signature.comment.as_deref();

        // `None` means an existing row pre-empted the insert. The
        // transaction rolls back automatically on any error, releasing the
        // connection on every exit path.
        let inserted = conn
            .transaction::<Option<i64>, diesel::result::Error, _>(|conn| {
                async move {
                    let existing: i64 = signatures::table
                        .filter(
                            signatures::campaign_id
                                .eq(campaign_id)
                                .and(signatures::name.eq(name)),
                        )
                        .count()
                        .get_result(conn)
                        .await?;

                    if existing != 0 {
                        return Ok(None);
                    }

                    let new_row = NewSignatureRow {
                        campaign_id,
                        name,
                        signature_comment: comment,
                    };
                    let id: i64 = diesel::insert_into(signatures::table)
                        .values(&new_row)
                        .returning(signatures::id)
                        .get_result(conn)
                        .await?;
                    Ok(Some(id))
                }
                .scope_boxed()
            })
            .await;

        match inserted {
            Ok(Some(id)) => {
                let id = SignatureId::new(id)
                    .map_err(|err| SignaturePersistenceError::query(err.to_string()))?;
                Ok(SignatureOutcome::Recorded(id))
            }
            Ok(None) => Ok(SignatureOutcome::AlreadySigned),
            // A concurrent transaction won the race; the backstop index
            // rejected our insert at commit time.
            Err(error) if is_unique_violation(&error) => Ok(SignatureOutcome::AlreadySigned),
            Err(error) => Err(map_diesel_error(error)),
        }
    }
}
