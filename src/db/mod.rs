pub mod audit;
pub mod join_requests;
pub mod project_owners;
pub mod projects;
pub mod team_members;
pub mod teams;
pub mod users;

use std::future::Future;
use std::time::Duration;

use futures_util::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use tokio::time::Instant;

use crate::error::AppError;

/// Owns the connection pool for projects, teams, members, join requests and
/// ownership. Constructed once at startup and handed to every component.
#[derive(Clone)]
pub struct MembershipStore {
    pool: PgPool,
    operation_timeout: Duration,
}

impl MembershipStore {
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `f` inside one transaction. Commits on `Ok`, rolls back on `Err`.
    ///
    /// `BEGIN` and the work in `f` run under the operation deadline. If it
    /// fires (or the caller drops the future) the transaction is dropped
    /// uncommitted and the connection rolls it back. Once `f` has returned
    /// `Ok`, `COMMIT` runs to completion so a reported `Timeout` always means
    /// nothing was written.
    pub async fn transaction<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
    {
        let deadline = Instant::now() + self.operation_timeout;

        let mut tx = match tokio::time::timeout_at(deadline, self.pool.begin()).await {
            Ok(tx) => tx?,
            Err(_) => return Err(AppError::Timeout),
        };

        let outcome = tokio::time::timeout_at(deadline, f(&mut *tx)).await;
        match outcome {
            Ok(Ok(value)) => {
                tx.commit().await?;
                Ok(value)
            }
            Ok(Err(e)) => {
                if let Err(rb) = tx.rollback().await {
                    tracing::warn!("Rollback after {} failed: {rb}", e.kind());
                }
                Err(e)
            }
            // Dropping `tx` mid-statement; the pool rolls it back on release.
            Err(_) => Err(AppError::Timeout),
        }
    }

    /// Bound a non-transactional store call by the operation deadline.
    pub async fn with_deadline<T, Fut>(&self, fut: Fut) -> Result<T, AppError>
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
