//! Client data layer: per-resource query specs and retrying fetch.
//!
//! Every logical resource pairs a fixed cache key with its endpoint, so a
//! seeded cache entry is found by the exact key the fetch would use. Retry
//! with exponential backoff lives here, not in the server-side fetcher.

use std::time::Duration;

use serde_json::Value;

use super::cache::{QueryCache, QueryKey};
use crate::errors::ApiError;
use crate::fetch::ContentFetcher;

/// Route-local refetch toggles. Configuration, not behavior: the home and
/// list routes prefer fresher data on revisit, single posts do not.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub refetch_on_window_focus: bool,
    pub refetch_on_mount: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            refetch_on_window_focus: false,
            refetch_on_mount: true,
        }
    }
}

/// One logical resource: cache key, endpoint, refetch toggles.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub key: QueryKey,
    pub endpoint: String,
    pub options: QueryOptions,
}

pub fn personal() -> QuerySpec {
    QuerySpec {
        key: QueryKey::new(["personal"]),
        endpoint: "/personal".to_string(),
        options: QueryOptions::default(),
    }
}

pub fn projects() -> QuerySpec {
    QuerySpec {
        key: QueryKey::new(["projects"]),
        endpoint: "/projects".to_string(),
        options: QueryOptions::default(),
    }
}

pub fn work_experience() -> QuerySpec {
    QuerySpec {
        key: QueryKey::new(["workExperience"]),
        endpoint: "/work-experience".to_string(),
        options: QueryOptions::default(),
    }
}

pub fn blog_posts() -> QuerySpec {
    QuerySpec {
        key: QueryKey::new(["blogPosts"]),
        endpoint: "/blog".to_string(),
        options: QueryOptions::default(),
    }
}

pub fn blog_post(id: &str) -> QuerySpec {
    QuerySpec {
        key: QueryKey::new(["blogPost", id]),
        endpoint: format!("/blog/{}", id),
        options: QueryOptions {
            refetch_on_mount: false,
            ..QueryOptions::default()
        },
    }
}

/// Capped exponential backoff: `min(base * 2^attempt, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// The uniform three-state contract every route consumer renders from.
#[derive(Debug)]
pub enum QueryState<T> {
    /// A fetch is in flight; render a placeholder.
    Loading,
    /// The fetch failed; render an error panel with a retry action.
    Error(ApiError),
    /// Data is available.
    Success(T),
}

impl<T> QueryState<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }
}

/// Fetch an endpoint, retrying every failure kind up to the policy's cap.
pub async fn fetch_with_retry(
    fetcher: &ContentFetcher,
    endpoint: &str,
    policy: &RetryPolicy,
) -> Result<Value, ApiError> {
    let mut attempt = 0;
    loop {
        match fetcher.get_json::<Value>(endpoint).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.retries => {
                let delay = policy.delay(attempt);
                tracing::debug!(
                    "fetch {} failed on attempt {} ({}), retrying in {:?}",
                    endpoint,
                    attempt + 1,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Resolve one query against the cache: a fresh entry (or any entry when the
/// route opts out of refetch-on-mount) is served without touching the
/// network; otherwise fetch, store, and return.
pub async fn run_query(
    cache: &mut QueryCache,
    fetcher: &ContentFetcher,
    spec: &QuerySpec,
    policy: &RetryPolicy,
) -> QueryState<Value> {
    if let Some(cached) = cache.get(&spec.key) {
        if cache.is_fresh(&spec.key) || !spec.options.refetch_on_mount {
            return QueryState::Success(cached.clone());
        }
    }

    match fetch_with_retry(fetcher, &spec.endpoint, policy).await {
        Ok(value) => {
            cache.set(spec.key.clone(), value.clone());
            QueryState::Success(value)
        }
        Err(err) => QueryState::Error(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
    use serde_json::json;

    use super::*;

    #[test]
    fn backoff_doubles_and_caps_at_thirty_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_millis(1000));
        assert_eq!(policy.delay(1), Duration::from_millis(2000));
        assert_eq!(policy.delay(2), Duration::from_millis(4000));
        assert_eq!(policy.delay(4), Duration::from_millis(16_000));
        assert_eq!(policy.delay(5), Duration::from_millis(30_000));
        assert_eq!(policy.delay(30), Duration::from_millis(30_000));
    }

    #[test]
    fn query_keys_match_the_hydration_seeding_keys() {
        // The handshake invariant: seeded keys and fetch keys must be equal.
        assert_eq!(personal().key, QueryKey::new(["personal"]));
        assert_eq!(projects().key, QueryKey::new(["projects"]));
        assert_eq!(work_experience().key, QueryKey::new(["workExperience"]));
        assert_eq!(blog_posts().key, QueryKey::new(["blogPosts"]));
        assert_eq!(blog_post("42").key, QueryKey::new(["blogPost", "42"]));
        assert_eq!(blog_post("42").key.to_json(), r#"["blogPost","42"]"#);
    }

    #[test]
    fn focus_refetch_is_off_everywhere() {
        for spec in [
            personal(),
            projects(),
            work_experience(),
            blog_posts(),
            blog_post("42"),
        ] {
            assert!(!spec.options.refetch_on_window_focus);
        }
        assert!(personal().options.refetch_on_mount);
        assert!(!blog_post("42").options.refetch_on_mount);
    }

    #[tokio::test]
    async fn fresh_cache_hit_never_touches_the_network() {
        // Port 1 is never listening, so any network attempt would error.
        let fetcher = ContentFetcher::new("http://127.0.0.1:1/api");
        let mut cache = QueryCache::default();
        cache.set(QueryKey::new(["personal"]), json!({"name": "Ada"}));

        let policy = RetryPolicy {
            retries: 0,
            ..RetryPolicy::default()
        };
        let state = run_query(&mut cache, &fetcher, &personal(), &policy).await;
        match state {
            QueryState::Success(value) => assert_eq!(value["name"], "Ada"),
            other => panic!("expected cached success, got {:?}", other),
        }
    }

    async fn spawn_flaky(hits: Arc<AtomicUsize>) -> String {
        async fn handler(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
            hits.fetch_add(1, Ordering::SeqCst);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "db down"})),
            )
        }
        let router = Router::new()
            .route("/personal", get(handler))
            .with_state(hits);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn failures_are_retried_up_to_the_cap_then_surfaced() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_flaky(hits.clone()).await;
        let fetcher = ContentFetcher::new(base);

        let policy = RetryPolicy {
            retries: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
        };
        let mut cache = QueryCache::default();
        let state = run_query(&mut cache, &fetcher, &personal(), &policy).await;

        match state {
            QueryState::Error(err) => {
                assert_eq!(err.message(), "db down");
                assert_eq!(err.status(), Some(500));
            }
            other => panic!("expected error state, got {:?}", other),
        }
        // Initial attempt plus two retries.
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn stale_entry_with_refetch_on_mount_disabled_is_served() {
        let fetcher = ContentFetcher::new("http://127.0.0.1:1/api");
        let mut cache = QueryCache::new(crate::client::cache::CachePolicy {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(600),
        });
        let spec = blog_post("42");
        cache.set(spec.key.clone(), json!({"id": "42"}));

        let state = run_query(&mut cache, &fetcher, &spec, &RetryPolicy::default()).await;
        assert!(state.is_success());
    }
}
