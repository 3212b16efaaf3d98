use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analytics::correlation::{correlation_point, CorrelationPoint};
use crate::analytics::series::{
    correlation_chart, correlation_factors, energy_history_chart, metric_key,
    time_breakdown_chart, time_breakdown_hours, trend_chart, trend_series, BarChart, FilledChart,
    LineChart, TIME_BREAKDOWN_LABELS,
};
use crate::analytics::time_aggregator::{aggregate_time_entries, ActivityDistribution};
use crate::analytics::trend::{trend_delta, trend_direction, trend_summary, Metric, TrendDirection};
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionQuery {
    pub time_frame: Option<String>,
}

/// Per-category hour totals over the selected window, shaped for the
/// activity-distribution card.
pub async fn activity_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> AppResult<Json<ActivityDistribution>> {
    let now = Utc::now();
    let start = match query.time_frame.as_deref().unwrap_or("last30") {
        "last7" => now - Duration::days(7),
        "last90" => now - Duration::days(90),
        "lastYear" => now - Duration::days(365),
        _ => now - Duration::days(30),
    };

    let entries = sqlx::query_as::<_, (String, f64)>(
        r#"
        SELECT te.category_id, te.hours
        FROM time_entries te
        JOIN check_ins ci ON ci.id = te.check_in_id
        WHERE ci.ts_utc >= $1 AND ci.ts_utc <= $2
        "#,
    )
    .bind(start)
    .bind(now)
    .fetch_all(&state.db)
    .await?;

    let known_categories =
        sqlx::query_scalar::<_, String>("SELECT id FROM time_categories ORDER BY created_at ASC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(aggregate_time_entries(&entries, &known_categories)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBreakdownResponse {
    pub chart_data: BarChart,
    pub stats: serde_json::Value,
}

pub async fn time_breakdown() -> Json<TimeBreakdownResponse> {
    let hours = time_breakdown_hours();

    Json(TimeBreakdownResponse {
        chart_data: time_breakdown_chart(),
        stats: json!({
            "total_hours": 168,
            "breakdown": {
                TIME_BREAKDOWN_LABELS[0]: hours[0],
                TIME_BREAKDOWN_LABELS[1]: hours[1],
                TIME_BREAKDOWN_LABELS[2]: hours[2],
            }
        }),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    pub metric: Option<String>,
    pub period_days: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    #[serde(rename = "chartData")]
    pub chart_data: FilledChart,
    pub trend_direction: TrendDirection,
    pub summary: String,
}

pub async fn trends(Query(query): Query<TrendQuery>) -> AppResult<Json<TrendResponse>> {
    let metric_name = query.metric.as_deref().unwrap_or("physical_energy");
    let metric = Metric::from_key(metric_name)
        .ok_or_else(|| AppError::Validation(format!("Invalid metric: {metric_name}")))?;
    let days = query.period_days.unwrap_or(30).clamp(1, 365);

    let data = trend_series(metric, days);
    let delta = trend_delta(&data);

    Ok(Json(TrendResponse {
        trend_direction: trend_direction(delta),
        summary: trend_summary(metric, delta),
        chart_data: trend_chart(metric, data),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CorrelationQuery {
    #[allow(dead_code)]
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResponse {
    pub chart_data: BarChart,
    pub correlations: Vec<CorrelationPoint>,
}

/// Correlation bars against one target metric. Each point carries its value
/// in exactly one severity band so the stacked chart renders one series.
pub async fn correlations(Query(_query): Query<CorrelationQuery>) -> Json<CorrelationResponse> {
    let factors = correlation_factors();

    let correlations = factors
        .iter()
        .map(|(name, value)| correlation_point(*name, value * 100.0))
        .collect();

    Json(CorrelationResponse {
        chart_data: correlation_chart(&factors),
        correlations,
    })
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub metrics: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub chart_data: LineChart,
}

pub async fn history(Query(query): Query<HistoryQuery>) -> Json<HistoryResponse> {
    let mut chart = energy_history_chart();

    let selected: Vec<String> = query
        .metrics
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    if !selected.is_empty() {
        chart
            .datasets
            .retain(|ds| selected.contains(&metric_key(&ds.label)));
    }

    Json(HistoryResponse { chart_data: chart })
}
