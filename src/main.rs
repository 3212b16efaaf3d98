use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod analytics;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
#[cfg(test)]
mod test_support;

use config::Config;
use services::insight_cache::InsightCache;
use services::llm::LlmClient;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub llm: LlmClient,
    pub insight_cache: InsightCache,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energytrack_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config)
        .await
        .expect("Failed to create database pool");

    // Run migrations (includes the built-in time-category seed)
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let llm = LlmClient::new(&config);
    let insight_cache = InsightCache::new(config.insight_cache_max_entries);

    let state = AppState {
        db,
        config: config.clone(),
        llm,
        insight_cache,
    };

    // Public routes: no caller identity involved
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route(
            "/api/time-categories",
            get(handlers::time_categories::list_categories),
        )
        .route(
            "/api/time-categories",
            post(handlers::time_categories::create_category),
        )
        .route(
            "/api/time-categories/:id",
            delete(handlers::time_categories::delete_category),
        )
        .route(
            "/api/analytics/activity-distribution",
            get(handlers::analytics::activity_distribution),
        )
        .route(
            "/api/analytics/time-breakdown",
            get(handlers::analytics::time_breakdown),
        )
        .route("/api/analytics/trends", get(handlers::analytics::trends))
        .route(
            "/api/analytics/correlations",
            get(handlers::analytics::correlations),
        )
        .route("/api/analytics/history", get(handlers::analytics::history))
        .route("/api/insights", post(handlers::insights::generate_insight));

    // Guest-tolerant routes: authenticated callers are scoped to their own
    // records, everyone else writes/reads as the anonymous guest
    let guest_routes = Router::new()
        .route("/api/check-ins", get(handlers::check_ins::list_check_ins))
        .route("/api/check-ins", post(handlers::check_ins::create_check_in))
        .route(
            "/api/check-ins/summary",
            get(handlers::check_ins::today_summary),
        )
        .route("/api/daily-insight", get(handlers::insights::daily_insight))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::optional_auth,
        ));

    // Owner-scoped routes: a valid access token is mandatory
    let protected_routes = Router::new()
        .route(
            "/api/custom-trackers",
            get(handlers::custom_trackers::list_trackers),
        )
        .route(
            "/api/custom-trackers",
            post(handlers::custom_trackers::create_tracker),
        )
        .route(
            "/api/custom-trackers/:id",
            get(handlers::custom_trackers::get_tracker),
        )
        .route(
            "/api/custom-trackers/:id",
            put(handlers::custom_trackers::update_tracker),
        )
        .route(
            "/api/custom-trackers/:id",
            patch(handlers::custom_trackers::update_tracker),
        )
        .route(
            "/api/custom-trackers/:id",
            delete(handlers::custom_trackers::delete_tracker),
        )
        .route(
            "/api/happy-moments",
            get(handlers::happy_moments::list_moments),
        )
        .route(
            "/api/happy-moments",
            post(handlers::happy_moments::create_moment),
        )
        .route(
            "/api/happy-moments/:id",
            get(handlers::happy_moments::get_moment),
        )
        .route(
            "/api/happy-moments/:id",
            put(handlers::happy_moments::update_moment),
        )
        .route(
            "/api/happy-moments/:id",
            delete(handlers::happy_moments::delete_moment),
        )
        .route("/api/pomodoro", post(handlers::pomodoro::create_session))
        .route(
            "/api/recommendations",
            post(handlers::insights::recommendations),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        // In dev, also allow LAN access (e.g. testing from another device)
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(public_routes)
        .merge(guest_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
