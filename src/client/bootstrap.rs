//! Client bootstrap: seeds the query cache from the server-embedded blob and
//! decides between hydrating server markup and rendering from scratch.

use serde::Serialize;
use serde_json::Value;

use super::cache::{QueryCache, QueryKey};
use crate::models::InitialData;

/// Sentinel post id when the current path carries none.
const UNKNOWN_POST_ID: &str = "unknown";

/// How the application mounts over the document.
///
/// Hydrating an empty mount point or re-rendering over server markup both
/// produce a broken interactive tree, so this branch is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapMode {
    /// Server markup is present: attach interactivity in place.
    Hydrate,
    /// Empty mount point: render the whole tree client-side.
    Render,
}

/// Parse the raw `window.__INITIAL_DATA__` blob. A malformed blob is logged
/// and treated as absent — bootstrap continues without seeded data.
pub fn read_initial_data(raw: &str) -> Option<InitialData> {
    match serde_json::from_str(raw) {
        Ok(initial) => Some(initial),
        Err(err) => {
            tracing::warn!("ignoring malformed initial data blob: {}", err);
            None
        }
    }
}

/// Post id for the parametric `blogPost` cache key: the path segment after
/// `/blog/`, or the `"unknown"` sentinel when the path carries none.
pub fn post_id_from_path(path: &str) -> String {
    let id = path
        .split_once("/blog/")
        .map(|(_, rest)| rest.split(['?', '#']).next().unwrap_or(""))
        .unwrap_or("");
    if id.is_empty() {
        UNKNOWN_POST_ID.to_string()
    } else {
        id.to_string()
    }
}

/// Seed the cache from initial data. Each recognized key maps to the exact
/// cache key the matching query function uses; the legacy `queries` map is
/// seeded entry by entry, skipping (not aborting on) malformed keys.
pub fn seed_cache(cache: &mut QueryCache, initial: &InitialData, path: &str) {
    if let Some(personal) = &initial.personal {
        seed(cache, QueryKey::new(["personal"]), personal);
    }
    if let Some(projects) = &initial.projects {
        seed(cache, QueryKey::new(["projects"]), projects);
    }
    if let Some(work) = &initial.work_experience {
        seed(cache, QueryKey::new(["workExperience"]), work);
    }
    if let Some(post) = &initial.blog_post {
        let id = post_id_from_path(path);
        seed(cache, QueryKey::new(["blogPost", id.as_str()]), post);
    }
    if let Some(posts) = &initial.blog_posts {
        seed(cache, QueryKey::new(["blogPosts"]), posts);
    }

    if let Some(queries) = &initial.queries {
        for (raw_key, value) in queries {
            match QueryKey::parse(raw_key) {
                Ok(key) => cache.set(key, value.clone()),
                Err(err) => {
                    tracing::warn!("skipping legacy cache entry {:?}: {}", raw_key, err);
                }
            }
        }
    }
}

fn seed<T: Serialize>(cache: &mut QueryCache, key: QueryKey, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => cache.set(key, value),
        Err(err) => tracing::warn!("failed to seed {}: {}", key.to_json(), err),
    }
}

/// Full bootstrap: read the blob once, seed the cache, pick the mount mode.
pub fn bootstrap(
    cache: &mut QueryCache,
    raw_blob: Option<&str>,
    path: &str,
    mount_has_children: bool,
) -> BootstrapMode {
    if let Some(raw) = raw_blob {
        if let Some(initial) = read_initial_data(raw) {
            seed_cache(cache, &initial, path);
        }
    }

    if mount_has_children {
        BootstrapMode::Hydrate
    } else {
        BootstrapMode::Render
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use super::*;
    use crate::models::{PersonalInfo, Project};

    fn sample_personal() -> PersonalInfo {
        serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "title": "Analytical Engineer",
            "summary": "First programmer."
        }))
        .unwrap()
    }

    fn sample_projects() -> Vec<Project> {
        serde_json::from_value(json!([{"name": "Engine", "description": "Difference engine"}]))
            .unwrap()
    }

    #[test]
    fn seeding_places_payloads_at_the_matching_keys() {
        let mut cache = QueryCache::default();
        let initial = InitialData {
            personal: Some(sample_personal()),
            projects: Some(sample_projects()),
            ..InitialData::default()
        };

        seed_cache(&mut cache, &initial, "/");

        let personal = cache.get(&QueryKey::new(["personal"])).unwrap();
        assert_eq!(personal["name"], "Ada Lovelace");
        let projects = cache.get(&QueryKey::new(["projects"])).unwrap();
        assert_eq!(projects[0]["name"], "Engine");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn blog_post_key_derives_its_id_from_the_path() {
        let mut cache = QueryCache::default();
        let initial = InitialData {
            blog_post: Some(
                serde_json::from_value(json!({"id": "42", "title": "T"})).unwrap(),
            ),
            ..InitialData::default()
        };

        seed_cache(&mut cache, &initial, "/blog/42");
        assert!(cache.get(&QueryKey::new(["blogPost", "42"])).is_some());

        let mut bare = QueryCache::default();
        seed_cache(&mut bare, &initial, "/somewhere-else");
        assert!(bare.get(&QueryKey::new(["blogPost", "unknown"])).is_some());
    }

    #[test]
    fn post_id_extraction_handles_queries_and_absence() {
        assert_eq!(post_id_from_path("/blog/42"), "42");
        assert_eq!(post_id_from_path("/blog/42?ref=home"), "42");
        assert_eq!(post_id_from_path("/blog/"), "unknown");
        assert_eq!(post_id_from_path("/"), "unknown");
    }

    #[test]
    fn legacy_queries_seed_directly_and_skip_malformed_keys() {
        let mut queries: HashMap<String, Value> = HashMap::new();
        queries.insert(r#"["blogPost","42"]"#.to_string(), json!({"id": "42"}));
        queries.insert("not a json key".to_string(), json!("dropped"));

        let initial = InitialData {
            queries: Some(queries),
            ..InitialData::default()
        };
        let mut cache = QueryCache::default();
        seed_cache(&mut cache, &initial, "/");

        assert_eq!(
            cache.get(&QueryKey::new(["blogPost", "42"])),
            Some(&json!({"id": "42"}))
        );
        // The malformed entry was skipped without aborting the rest.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn mount_state_selects_the_mode() {
        let mut cache = QueryCache::default();
        assert_eq!(
            bootstrap(&mut cache, Some("{}"), "/", true),
            BootstrapMode::Hydrate
        );
        assert_eq!(
            bootstrap(&mut cache, Some("{}"), "/", false),
            BootstrapMode::Render
        );
        // No blob at all still mounts.
        assert_eq!(bootstrap(&mut cache, None, "/", false), BootstrapMode::Render);
    }

    #[test]
    fn malformed_blob_is_ignored_not_fatal() {
        let mut cache = QueryCache::default();
        let mode = bootstrap(&mut cache, Some("{nope"), "/", true);
        assert_eq!(mode, BootstrapMode::Hydrate);
        assert!(cache.is_empty());
    }
}
