pub mod insight_cache;
pub mod llm;
