use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::middleware::{AuthUser, MaybeUser};
use crate::error::{AppError, AppResult};
use crate::models::check_in::CheckIn;
use crate::services::insight_cache::cache_key;
use crate::services::llm::{
    chart_explanation_prompt, daily_insight_prompt, recommendation_prompt, weekly_summary_prompt,
    DailyInsight, WELLNESS_ANALYST_SYSTEM, WELLNESS_COACH_SYSTEM,
};
use crate::AppState;

/// One structured insight per caller per UTC day; repeated calls within the
/// day return the cached result without touching the LLM. Unlike the
/// free-text paths, LLM or parse failures here surface as 500s.
pub async fn daily_insight(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
) -> AppResult<Json<DailyInsight>> {
    let user_id = user.as_ref().map(|u| u.id);
    let today = Utc::now().date_naive();
    let key = cache_key(user_id, today);

    if let Some(cached) = state.insight_cache.get(&key).await {
        return Ok(Json(cached));
    }

    let since = Utc::now() - Duration::days(14);
    let check_ins = match user_id {
        Some(id) => {
            sqlx::query_as::<_, CheckIn>(
                "SELECT * FROM check_ins WHERE user_id = $1 AND ts_utc >= $2 ORDER BY ts_utc DESC",
            )
            .bind(id)
            .bind(since)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as::<_, CheckIn>(
                "SELECT * FROM check_ins WHERE ts_utc >= $1 ORDER BY ts_utc DESC",
            )
            .bind(since)
            .fetch_all(&state.db)
            .await?
        }
    };

    if check_ins.is_empty() {
        return Ok(Json(DailyInsight {
            text: "Start tracking your energy to get personalized insights!".into(),
            explanation: "We'll analyze your patterns once you have some data.".into(),
            confidence: 0.5,
            generated_at: Utc::now(),
        }));
    }

    let check_in_data: Vec<serde_json::Value> = check_ins
        .iter()
        .map(|ci| {
            json!({
                "timestamp": ci.ts_utc,
                "physical": ci.physical17,
                "cognitive": ci.cognitive17,
                "mood": ci.mood17,
                "stress": ci.stress17,
            })
        })
        .collect();

    let insight = state
        .llm
        .generate_daily_insight(&json!(check_in_data))
        .await?;

    state.insight_cache.insert(key, insight.clone()).await;

    Ok(Json(insight))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub check_ins: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
}

/// One actionable tip from the supplied check-ins. Runs behind
/// `require_auth`, so unauthenticated calls are rejected before the LLM
/// client is ever invoked. LLM failures propagate (no soft fallback here).
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Json(body): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let prompt = recommendation_prompt(&body.check_ins);

    let recommendation = state
        .llm
        .complete(WELLNESS_COACH_SYSTEM, &prompt, 150)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(RecommendationResponse { recommendation }))
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    #[serde(rename = "type")]
    pub insight_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: String,
}

/// Dispatches to the chart/daily/weekly explanation prompts. The LLM call
/// soft-fails into a fixed fallback string, so a well-formed request always
/// gets a 200.
pub async fn generate_insight(
    State(state): State<AppState>,
    Json(body): Json<InsightRequest>,
) -> AppResult<Json<InsightResponse>> {
    let prompt = match body.insight_type.as_str() {
        "chart" => {
            let chart_type = body.data["chartType"].as_str().unwrap_or_default();
            chart_explanation_prompt(chart_type, &body.data["chartData"])
                .ok_or_else(|| AppError::Validation("Invalid chart type".into()))?
        }
        "daily" => daily_insight_prompt(&body.data["userData"]),
        "weekly" => weekly_summary_prompt(&body.data["weekData"]),
        _ => return Err(AppError::Validation("Invalid insight type".into())),
    };

    let insight = state
        .llm
        .generate_insight(WELLNESS_ANALYST_SYSTEM, &prompt)
        .await;

    Ok(Json(InsightResponse { insight }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::middleware::require_auth;
    use crate::test_support::test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_recommendations_rejects_anonymous_before_llm_or_db() {
        let state = test_state();
        let app = Router::new()
            .route("/api/recommendations", post(recommendations))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/recommendations")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"checkIns":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_recommendations_rejects_garbage_token() {
        let state = test_state();
        let app = Router::new()
            .route("/api/recommendations", post(recommendations))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/recommendations")
                    .header("authorization", "Bearer not-a-jwt")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"checkIns":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
