use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Applies `./migrations`. Failures are logged and startup continues.
pub async fn migrate(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }
}
