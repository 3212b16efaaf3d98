use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Time categories are global and shared across users. The built-ins
/// (work/family/rest/hobby) are seeded by migration and never deleted;
/// user-created ones carry `is_custom = true`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeCategory {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTimeCategoryRequest {
    pub id: String,
    pub label: String,
    pub icon: String,
}
