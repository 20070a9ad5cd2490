//! PostgreSQL-backed `CampaignRepository` implementation using Diesel ORM.
//!
//! This adapter persists campaigns and loads them back through validated
//! domain constructors, so malformed rows surface as query errors instead of
//! leaking into the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CampaignPersistenceError, CampaignRepository};
use crate::domain::{Campaign, CampaignId, Goal, NewCampaign, Statement, Title, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CampaignRow, NewCampaignRow};
use super::pool::{DbPool, PoolError};
use super::schema::campaigns;

/// Diesel-backed implementation of the campaign repository port.
#[derive(Clone)]
pub struct DieselCampaignRepository {
    pool: DbPool,
}

impl DieselCampaignRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CampaignPersistenceError {
    map_basic_pool_error(error, CampaignPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CampaignPersistenceError {
    map_basic_diesel_error(
        error,
        CampaignPersistenceError::query,
        CampaignPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain campaign.
fn row_to_campaign(row: CampaignRow) -> Result<Campaign, CampaignPersistenceError> {
    let CampaignRow {
        id,
        title,
        statement,
        goal,
        create_user_id,
        created_at,
    } = row;

    Ok(Campaign {
        id: CampaignId::new(id).map_err(|err| CampaignPersistenceError::query(err.to_string()))?,
        title: Title::new(title).map_err(|err| CampaignPersistenceError::query(err.to_string()))?,
        statement: Statement::new(statement)
            .map_err(|err| CampaignPersistenceError::query(err.to_string()))?,
        goal: Goal::new(goal).map_err(|err| CampaignPersistenceError::query(err.to_string()))?,
        create_user_id: UserId::new(create_user_id)
            .map_err(|err| CampaignPersistenceError::query(err.to_string()))?,
        created_at,
    })
}

#[async_trait]
impl CampaignRepository for DieselCampaignRepository {
    async fn insert(
        &self,
        campaign: &NewCampaign,
    ) -> Result<CampaignId, CampaignPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCampaignRow {
            title: campaign.title.as_str(),
            statement: campaign.statement.as_str(),
            goal: campaign.goal.get(),
            create_user_id: campaign.create_user_id.get(),
        };

        let id: i64 = diesel::insert_into(campaigns::table)
            .values(&new_row)
            .returning(campaigns::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        CampaignId::new(id).map_err(|err| CampaignPersistenceError::query(err.to_string()))
    }

    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = campaigns::table
            .filter(campaigns::id.eq(id.get()))
            .select(CampaignRow::as_select())
            .first::<CampaignRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_campaign).transpose()
    }

    async fn list_by_creator(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Campaign>, CampaignPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CampaignRow> = campaigns::table
            .filter(campaigns::create_user_id.eq(user_id.get()))
            .order((campaigns::created_at.desc(), campaigns::id.desc()))
            .select(CampaignRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_campaign).collect()
    }
}
