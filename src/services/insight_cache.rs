//! Per-day memoization of generated daily insights. Keys pair the caller
//! (user id or "guest") with a UTC calendar day supplied by the caller, so
//! tests control time directly. Capacity-bounded: inserting past
//! `max_entries` evicts the oldest-generated entry.
//!
//! Concurrent requests for the same key can both miss and both generate;
//! last write wins, which is acceptable for this data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::llm::DailyInsight;

pub fn cache_key(user_id: Option<Uuid>, day: NaiveDate) -> String {
    match user_id {
        Some(id) => format!("{}:{}", id, day),
        None => format!("guest:{}", day),
    }
}

#[derive(Clone)]
pub struct InsightCache {
    entries: Arc<Mutex<HashMap<String, DailyInsight>>>,
    max_entries: usize,
}

impl InsightCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_entries: max_entries.max(1),
        }
    }

    pub async fn get(&self, key: &str) -> Option<DailyInsight> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: String, insight: DailyInsight) {
        let mut entries = self.entries.lock().await;

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, v)| v.generated_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest_key) = oldest {
                entries.remove(&oldest_key);
            }
        }

        entries.insert(key, insight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn insight(text: &str, minute: u32) -> DailyInsight {
        DailyInsight {
            text: text.into(),
            explanation: "because".into(),
            confidence: 0.7,
            generated_at: Utc.with_ymd_and_hms(2026, 8, 23, 9, minute, 0).unwrap(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn test_cache_key_guest_and_user() {
        assert_eq!(cache_key(None, day(23)), "guest:2026-08-23");

        let id = Uuid::nil();
        assert_eq!(
            cache_key(Some(id), day(23)),
            "00000000-0000-0000-0000-000000000000:2026-08-23"
        );
    }

    #[tokio::test]
    async fn test_second_lookup_returns_first_value_verbatim() {
        let cache = InsightCache::new(16);
        let key = cache_key(None, day(23));

        assert!(cache.get(&key).await.is_none());
        cache.insert(key.clone(), insight("first", 0)).await;

        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit.text, "first");

        // A later write for the same key wins.
        cache.insert(key.clone(), insight("second", 1)).await;
        assert_eq!(cache.get(&key).await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn test_users_and_days_are_isolated() {
        let cache = InsightCache::new(16);
        let user = Uuid::new_v4();

        cache
            .insert(cache_key(Some(user), day(23)), insight("mine", 0))
            .await;

        assert!(cache.get(&cache_key(None, day(23))).await.is_none());
        assert!(cache.get(&cache_key(Some(user), day(24))).await.is_none());
        assert!(cache.get(&cache_key(Some(user), day(23))).await.is_some());
    }

    #[tokio::test]
    async fn test_eviction_removes_oldest_generated() {
        let cache = InsightCache::new(2);

        cache.insert("a".into(), insight("a", 0)).await;
        cache.insert("b".into(), insight("b", 5)).await;
        cache.insert("c".into(), insight("c", 10)).await;

        assert!(cache.get("a").await.is_none(), "oldest entry must be evicted");
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn test_rewriting_existing_key_does_not_evict() {
        let cache = InsightCache::new(2);

        cache.insert("a".into(), insight("a", 0)).await;
        cache.insert("b".into(), insight("b", 5)).await;
        cache.insert("b".into(), insight("b2", 6)).await;

        assert!(cache.get("a").await.is_some());
        assert_eq!(cache.get("b").await.unwrap().text, "b2");
    }
}
