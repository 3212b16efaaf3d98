use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::time_category::{CreateTimeCategoryRequest, TimeCategory};
use crate::AppState;

/// Custom categories only; the built-ins are implicit in every client.
/// Categories are global and shared, not per-user.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<TimeCategory>>> {
    let categories = sqlx::query_as::<_, TimeCategory>(
        "SELECT * FROM time_categories WHERE is_custom = TRUE ORDER BY created_at ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateTimeCategoryRequest>,
) -> AppResult<Json<TimeCategory>> {
    if body.id.trim().is_empty() || body.label.trim().is_empty() {
        return Err(AppError::Validation(
            "Category id and label are required".into(),
        ));
    }

    // Idempotent by id: re-posting an existing category (including a
    // built-in) is a no-op update, never a duplicate or an error.
    let category = sqlx::query_as::<_, TimeCategory>(
        r#"
        INSERT INTO time_categories (id, label, icon, is_custom)
        VALUES ($1, $2, $3, TRUE)
        ON CONFLICT (id) DO UPDATE
            SET label = time_categories.label  -- no-op update to trigger RETURNING
        RETURNING *
        "#,
    )
    .bind(&body.id)
    .bind(&body.label)
    .bind(&body.icon)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    // Built-ins are not deletable; unknown ids are a no-op.
    sqlx::query("DELETE FROM time_categories WHERE id = $1 AND is_custom = TRUE")
        .bind(&category_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_rejects_blank_id_before_touching_storage() {
        let state = test_state();
        let app = Router::new()
            .route("/api/time-categories", post(create_category))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/time-categories")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"id":"  ","label":"Gardening","icon":"🌱"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
