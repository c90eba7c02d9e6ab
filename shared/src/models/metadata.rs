use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metadata {
    pub id: Uuid,
    pub name: String,
    pub namespace: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();
        Metadata {
            id,
            name: id.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            created_at: now,
            modified_at: now,
        }
    }
}
