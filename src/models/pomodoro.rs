use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub duration: i32,
    pub ts_utc: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePomodoroRequest {
    /// Minutes; defaults to a standard 25-minute session.
    pub duration: Option<i32>,
}
