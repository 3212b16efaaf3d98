use axum::{extract::State, http::StatusCode, Extension, Json};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::pomodoro::{CreatePomodoroRequest, PomodoroSession};
use crate::models::user::ensure_user;
use crate::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreatePomodoroRequest>,
) -> AppResult<(StatusCode, Json<PomodoroSession>)> {
    ensure_user(&state.db, auth_user.id).await?;

    let session = sqlx::query_as::<_, PomodoroSession>(
        r#"
        INSERT INTO pomodoro_sessions (id, user_id, duration, ts_utc)
        VALUES ($1, $2, $3, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.duration.unwrap_or(25))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(session)))
}
