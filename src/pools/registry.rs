use sqlx::PgPool;
use thiserror::Error;

use super::types::RegistryRow;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("pool registry is unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// List enabled pools ordered by sequence. Reads are independent and safe to
/// repeat; the registry is the only relational touchpoint in the service.
pub async fn list_enabled(db: &PgPool) -> Result<Vec<RegistryRow>, RegistryError> {
    let rows = sqlx::query_as::<_, RegistryRow>(
        "SELECT id, private_url, public_url, name, sequence
         FROM sources
         WHERE enabled = true AND sequence > 0
         ORDER BY sequence ASC",
    )
    .fetch_all(db)
    .await?;

    tracing::info!("Registry returned {} enabled pools", rows.len());
    Ok(rows)
}
