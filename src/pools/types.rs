use serde::{Deserialize, Serialize};

/// One row of the authoritative `sources` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistryRow {
    pub id: i64,
    pub private_url: String,
    pub public_url: String,
    pub name: String,
    pub sequence: i32,
}

/// Capability attribute advertised by a pool's /identify response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolAttribute {
    pub name: String,
    #[serde(default)]
    pub supported: bool,
}

/// Wire shape of `GET {private_url}/identify`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentifyResponse {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<PoolAttribute>,
}

/// A fully identified search pool. Lives for the duration of one request and
/// is rebuilt fresh the next time.
#[derive(Debug, Clone)]
pub struct Pool {
    pub id: String,
    pub source: String,
    pub private_url: String,
    pub public_url: String,
    pub sequence: u32,
    pub name: String,
    pub description: String,
    pub attributes: Vec<PoolAttribute>,
    pub external: bool,
    pub language: String,
}

impl Pool {
    pub fn from_identity(row: &RegistryRow, identity: IdentifyResponse, language: &str) -> Self {
        let external = identity
            .attributes
            .iter()
            .any(|attr| attr.name == "external_hold" && attr.supported);
        let name = if identity.name.is_empty() {
            row.name.clone()
        } else {
            identity.name
        };
        Self {
            id: identity.id,
            source: identity.source,
            private_url: row.private_url.clone(),
            public_url: row.public_url.clone(),
            sequence: row.sequence.max(0) as u32,
            name,
            description: identity.description,
            attributes: identity.attributes,
            external,
            language: language.to_string(),
        }
    }

    /// Clients may reference a pool by its id or its public URL.
    pub fn matches(&self, reference: &str) -> bool {
        !reference.is_empty() && (self.id == reference || self.public_url == reference)
    }
}

/// Client-visible identity summary, used in search responses and the pool
/// listing. The private URL never leaves the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub source: String,
    pub external: bool,
}

impl From<&Pool> for PoolSummary {
    fn from(pool: &Pool) -> Self {
        Self {
            id: pool.id.clone(),
            url: pool.public_url.clone(),
            name: pool.name.clone(),
            description: pool.description.clone(),
            source: pool.source.clone(),
            external: pool.external,
        }
    }
}
