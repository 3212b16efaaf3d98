use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HappyMoment {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub note: Option<String>,
    pub media_ref: Option<String>,
    pub ts_utc: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHappyMomentRequest {
    pub title: Option<String>,
    pub note: Option<String>,
    /// No upload pipeline is wired; clients send a placeholder ref when a
    /// photo was captured.
    pub media_ref: Option<String>,
    pub ts_utc: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHappyMomentRequest {
    pub title: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HappyMomentListQuery {
    pub limit: Option<i64>,
}
