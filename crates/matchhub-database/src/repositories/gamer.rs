//! Gamer presence repository implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use matchhub_core::error::{AppError, ErrorKind};
use matchhub_core::result::AppResult;
use matchhub_core::types::SessionId;
use matchhub_entity::gamer::Gamer;
use matchhub_entity::GamerStore;

/// Repository for the gamer presence roster.
///
/// Presence records are upserted on authentication and lazily refreshed by
/// directory listings; records untouched beyond the configured TTL are
/// purged by the presence sweeper via [`GamerStore::purge_stale`].
#[derive(Debug, Clone)]
pub struct GamerRepository {
    pool: PgPool,
}

impl GamerRepository {
    /// Create a new gamer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GamerStore for GamerRepository {
    async fn find_by_sid(&self, sid: &SessionId) -> AppResult<Option<Gamer>> {
        sqlx::query_as::<_, Gamer>("SELECT * FROM gamers WHERE sid = $1")
            .bind(sid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find gamer by sid", e)
            })
    }

    async fn find_by_sids(&self, sids: &[SessionId]) -> AppResult<Vec<Gamer>> {
        let raw: Vec<Uuid> = sids.iter().map(|s| s.0).collect();
        sqlx::query_as::<_, Gamer>("SELECT * FROM gamers WHERE sid = ANY($1)")
            .bind(&raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find gamers by sids", e)
            })
    }

    async fn touch(&self, sids: &[SessionId]) -> AppResult<u64> {
        let raw: Vec<Uuid> = sids.iter().map(|s| s.0).collect();
        let result = sqlx::query("UPDATE gamers SET updated_on = NOW() WHERE sid = ANY($1)")
            .bind(&raw)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch gamers", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn upsert(&self, user_name: &str, full_name: &str, sid: &SessionId) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO gamers (user_name, full_name, sid, updated_on) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (user_name) \
             DO UPDATE SET full_name = $2, sid = $3, updated_on = NOW()",
        )
        .bind(user_name)
        .bind(full_name)
        .bind(sid)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert gamer", e))?;

        Ok(())
    }

    async fn purge_stale(&self, ttl: Duration) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM gamers WHERE updated_on < NOW() - make_interval(secs => $1)")
                .bind(ttl.as_secs_f64())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to purge stale gamers", e)
                })?;

        Ok(result.rows_affected())
    }
}
