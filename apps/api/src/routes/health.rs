//! Liveness and database status.

use axum::{extract::State, Json};
use serde::Serialize;

use quotedesk_db::{Database, MigrationStatus};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the database answers and is fully migrated, else `"degraded"`
    pub status: &'static str,
    pub database: bool,
    pub migrations: Option<MigrationStatus>,
}

/// Always 200; callers read `status` to tell healthy from degraded.
pub async fn health(State(db): State<Database>) -> Json<HealthResponse> {
    let database = db.health_check().await;
    let migrations = if database {
        match db.migration_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!("Migration status unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    let healthy = database && migrations.map_or(false, |m| m.is_current());

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        database,
        migrations,
    })
}
