mod common;

#[cfg(test)]
pub mod fetch_cache_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::common::*;

    use socialit::common::ApiError;
    use socialit::config::FetchPolicy;
    use socialit::services::FetchCache;

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            detail: "boom".into(),
        }
    }

    #[tokio::test]
    async fn test_fresh_value_is_served_without_request() {
        let cache = FetchCache::new(FetchPolicy {
            dedupe_interval: Duration::from_secs(60),
            ..eager_policy()
        });
        let calls = AtomicUsize::new(0);
        let fetch = || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<Value, ApiError>(json!({"primary": "#000"})) }
        };

        let first = cache.get_with("theme", fetch).await.unwrap();
        let second = cache.get_with("theme", fetch).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_value_is_refetched() {
        let cache = FetchCache::new(eager_policy());
        cache.insert("theme", json!({"primary": "#old"}));

        let value = cache
            .get_with("theme", || async { Ok::<_, ApiError>(json!({"primary": "#new"})) })
            .await
            .unwrap();

        assert_eq!(value, json!({"primary": "#new"}));
        assert_eq!(cache.peek("theme"), Some(json!({"primary": "#new"})));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let cache = FetchCache::new(retrying_policy(2));
        let calls = AtomicUsize::new(0);

        let value = cache
            .get_with("hero", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err::<Value, _>(server_error())
                    } else {
                        Ok(json!({"headline": "Hi"}))
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(value["headline"], "Hi");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_value_served_after_retries_fail() {
        let cache = FetchCache::new(retrying_policy(1));
        cache.insert("footer", json!({"copyrightText": "kept"}));
        let calls = AtomicUsize::new(0);

        let value = cache
            .get_with("footer", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Value, _>(server_error()) }
            })
            .await
            .unwrap();

        assert_eq!(value, json!({"copyrightText": "kept"}));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_without_cached_value_fails() {
        let cache = FetchCache::new(retrying_policy(2));
        let calls = AtomicUsize::new(0);

        let result = cache
            .get_with("footer", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Value, _>(server_error()) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_evicts_and_is_not_retried() {
        let cache = FetchCache::new(retrying_policy(3));
        cache.insert("page", json!({"title": "gone"}));
        let calls = AtomicUsize::new(0);

        let result = cache
            .get_with("page", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Value, _>(ApiError::NotFound("page".into())) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.peek("page").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let cache = FetchCache::new(retrying_policy(3));
        let calls = AtomicUsize::new(0);

        let result = cache
            .get_with("users", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<Value, _>(ApiError::Unauthorized) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let cache = FetchCache::new(FetchPolicy {
            capacity: 2,
            ..eager_policy()
        });
        cache.insert("a", json!(1));
        cache.insert("b", json!(2));
        cache.insert("c", json!(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.peek("a").is_none());
        assert_eq!(cache.peek("c"), Some(json!(3)));

        cache.clear();
        assert!(cache.is_empty());
    }
}
