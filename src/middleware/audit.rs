use sqlx::PgPool;
use uuid::Uuid;

/// Record a committed membership mutation. Failures are logged, never returned:
/// the mutation itself has already committed.
pub async fn log_event(
    pool: &PgPool,
    project_id: Option<Uuid>,
    actor_id: Uuid,
    action: &str,
    resource_type: &str,
    resource_id: Option<Uuid>,
    details: Option<serde_json::Value>,
) {
    if let Err(e) = crate::db::audit::log_event(
        pool,
        project_id,
        Some(actor_id),
        action,
        resource_type,
        resource_id,
        details,
    )
    .await
    {
        tracing::error!("Failed to log audit event: {e}");
    }
}
