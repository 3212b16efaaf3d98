//! Helpers for router-level tests. The pool is lazy and never connects, so
//! these tests only reach code paths that respond before any query runs.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::services::insight_cache::InsightCache;
use crate::services::llm::LlmClient;
use crate::AppState;

pub fn test_state() -> AppState {
    let config = Arc::new(Config {
        database_url: "postgres://localhost/unused".into(),
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "test-secret".into(),
        claude_api_key: String::new(),
        claude_model: "claude-sonnet-4-20250514".into(),
        insight_cache_max_entries: 16,
    });

    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .expect("lazy pool from a static url");

    AppState {
        db,
        llm: LlmClient::new(&config),
        insight_cache: InsightCache::new(config.insight_cache_max_entries),
        config,
    }
}
