use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::custom_tracker::{
    CreateCustomTrackerRequest, CustomTracker, CustomTrackerValue, CustomTrackerWithValues,
    UnitType, UpdateCustomTrackerRequest,
};
use crate::models::user::ensure_user;
use crate::AppState;

const INVALID_UNIT_TYPE: &str = "Invalid unitType. Must be one of: number, scale, boolean, string";

pub async fn list_trackers(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CustomTracker>>> {
    let trackers = sqlx::query_as::<_, CustomTracker>(
        "SELECT * FROM custom_trackers WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(trackers))
}

pub async fn create_tracker(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateCustomTrackerRequest>,
) -> AppResult<(StatusCode, Json<CustomTracker>)> {
    let (label, icon, unit, unit_type) = match (&body.label, &body.icon, &body.unit, &body.unit_type) {
        (Some(label), Some(icon), Some(unit), Some(unit_type)) => (label, icon, unit, unit_type),
        _ => {
            return Err(AppError::Validation(
                "Missing required fields: label, icon, unit, unitType".into(),
            ))
        }
    };

    let unit_type =
        UnitType::parse(unit_type).ok_or_else(|| AppError::Validation(INVALID_UNIT_TYPE.into()))?;

    ensure_user(&state.db, auth_user.id).await?;

    let tracker = sqlx::query_as::<_, CustomTracker>(
        r#"
        INSERT INTO custom_trackers (id, user_id, label, icon, unit, unit_type, max_value)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(label)
    .bind(icon)
    .bind(unit)
    .bind(unit_type)
    .bind(body.max_value)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(tracker)))
}

async fn find_owned_tracker(
    state: &AppState,
    tracker_id: Uuid,
    user_id: Uuid,
) -> AppResult<CustomTracker> {
    sqlx::query_as::<_, CustomTracker>(
        "SELECT * FROM custom_trackers WHERE id = $1 AND user_id = $2",
    )
    .bind(tracker_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Custom tracker not found".into()))
}

/// Tracker detail with its most recent 30 values.
pub async fn get_tracker(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(tracker_id): Path<Uuid>,
) -> AppResult<Json<CustomTrackerWithValues>> {
    let tracker = find_owned_tracker(&state, tracker_id, auth_user.id).await?;

    let values = sqlx::query_as::<_, CustomTrackerValue>(
        r#"
        SELECT * FROM custom_tracker_values
        WHERE tracker_id = $1
        ORDER BY ts_utc DESC
        LIMIT 30
        "#,
    )
    .bind(tracker_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(CustomTrackerWithValues { tracker, values }))
}

pub async fn update_tracker(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(tracker_id): Path<Uuid>,
    Json(body): Json<UpdateCustomTrackerRequest>,
) -> AppResult<Json<CustomTracker>> {
    let _existing = find_owned_tracker(&state, tracker_id, auth_user.id).await?;

    let unit_type = body
        .unit_type
        .as_deref()
        .map(|s| UnitType::parse(s).ok_or_else(|| AppError::Validation(INVALID_UNIT_TYPE.into())))
        .transpose()?;

    let tracker = sqlx::query_as::<_, CustomTracker>(
        r#"
        UPDATE custom_trackers SET
            label = COALESCE($3, label),
            icon = COALESCE($4, icon),
            unit = COALESCE($5, unit),
            unit_type = COALESCE($6, unit_type),
            max_value = COALESCE($7, max_value),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(tracker_id)
    .bind(auth_user.id)
    .bind(&body.label)
    .bind(&body.icon)
    .bind(&body.unit)
    .bind(unit_type)
    .bind(body.max_value)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(tracker))
}

pub async fn delete_tracker(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(tracker_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let _existing = find_owned_tracker(&state, tracker_id, auth_user.id).await?;

    // Cascade removes the tracker's values.
    sqlx::query("DELETE FROM custom_trackers WHERE id = $1")
        .bind(tracker_id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
