use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::happy_moment::{
    CreateHappyMomentRequest, HappyMoment, HappyMomentListQuery, UpdateHappyMomentRequest,
};
use crate::models::user::ensure_user;
use crate::AppState;

pub async fn create_moment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateHappyMomentRequest>,
) -> AppResult<Json<HappyMoment>> {
    let (title, ts_utc) = match (&body.title, body.ts_utc) {
        (Some(title), Some(ts_utc)) if !title.trim().is_empty() => (title, ts_utc),
        _ => {
            return Err(AppError::Validation(
                "Missing required fields: title and tsUtc".into(),
            ))
        }
    };

    ensure_user(&state.db, auth_user.id).await?;

    let moment = sqlx::query_as::<_, HappyMoment>(
        r#"
        INSERT INTO happy_moments (id, user_id, title, note, media_ref, ts_utc)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(title)
    .bind(&body.note)
    .bind(&body.media_ref)
    .bind(ts_utc)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(moment))
}

/// Most recent moments, newest first. Default page is the three shown on
/// the home screen.
pub async fn list_moments(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HappyMomentListQuery>,
) -> AppResult<Json<Vec<HappyMoment>>> {
    let limit = query.limit.unwrap_or(3).clamp(1, 100);

    let moments = sqlx::query_as::<_, HappyMoment>(
        r#"
        SELECT * FROM happy_moments
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(auth_user.id)
    .bind(limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(moments))
}

async fn find_owned_moment(
    state: &AppState,
    moment_id: Uuid,
    user_id: Uuid,
) -> AppResult<HappyMoment> {
    sqlx::query_as::<_, HappyMoment>(
        "SELECT * FROM happy_moments WHERE id = $1 AND user_id = $2",
    )
    .bind(moment_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Happy moment not found".into()))
}

pub async fn get_moment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(moment_id): Path<Uuid>,
) -> AppResult<Json<HappyMoment>> {
    let moment = find_owned_moment(&state, moment_id, auth_user.id).await?;
    Ok(Json(moment))
}

pub async fn update_moment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(moment_id): Path<Uuid>,
    Json(body): Json<UpdateHappyMomentRequest>,
) -> AppResult<Json<HappyMoment>> {
    let _existing = find_owned_moment(&state, moment_id, auth_user.id).await?;

    let moment = sqlx::query_as::<_, HappyMoment>(
        r#"
        UPDATE happy_moments SET
            title = COALESCE($3, title),
            note = COALESCE($4, note)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(moment_id)
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.note)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(moment))
}

pub async fn delete_moment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(moment_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let _existing = find_owned_moment(&state, moment_id, auth_user.id).await?;

    sqlx::query("DELETE FROM happy_moments WHERE id = $1")
        .bind(moment_id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
