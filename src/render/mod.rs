//! SSR renderer: route classification and HTML document assembly.
//!
//! The renderer is a state machine over the normalized request path. Every
//! state resolves to a complete HTML document; upstream failures fall back to
//! the pre-fetch SEO data and an empty initial-data blob instead of erroring.

use crate::errors::RenderError;
use crate::fetch::ContentFetcher;
use crate::models::{BlogPost, InitialData};
use crate::seo::{generate_meta_tags, PageKind, SeoData, SITE_AUTHOR, SITE_ORIGIN};

/// Script the browser loads to boot the interactive application.
pub const CLIENT_ENTRY: &str = "/assets/app.js";

/// Mount element id; the client bootstrap hydrates or renders into it.
pub const MOUNT_ID: &str = "root";

const BLOG_TITLE: &str = "Sci-Fi Musings | Blog | Oludotun Longe";
const BLOG_DESCRIPTION: &str = "Exploring the infinite possibilities of time, space, and \
existence through science fiction articles.";

/// Fixed tags appended after the post category on article pages.
const ARTICLE_EXTRA_TAGS: [&str; 2] = ["Science Fiction", "Technology"];

/// Inlined above-the-fold styles so the shell paints before the bundle loads.
const CRITICAL_CSS: &str = "* { margin: 0; padding: 0; box-sizing: border-box; } \
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; \
background: #0a0a0a; color: #e0e0e0; } #root { min-height: 100vh; }";

/// Extensions that identify static-asset requests; these 404 before SSR runs.
const ASSET_EXTENSIONS: [&str; 12] = [
    "js", "css", "png", "jpg", "jpeg", "gif", "ico", "svg", "woff", "woff2", "ttf", "eot",
];

/// Logical page a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — portfolio home, three-way content fetch.
    Home,
    /// `/blog` — article listing.
    BlogIndex,
    /// `/blog/<id>` — single article.
    BlogPost(String),
    /// Static asset or API-prefixed path; skipped entirely.
    Asset,
    /// Anything else renders the default shell.
    Other,
}

/// Strip the query string and fragment from a raw path.
pub fn normalize_path(raw: &str) -> &str {
    raw.split(['?', '#']).next().unwrap_or("")
}

impl Route {
    pub fn parse(raw: &str) -> Route {
        let path = normalize_path(raw);

        if path.starts_with("/api/") || path.starts_with("/_next/") || has_asset_extension(path) {
            return Route::Asset;
        }

        match path {
            "" | "/" => Route::Home,
            "/blog" => Route::BlogIndex,
            _ => {
                if let Some(id) = path.strip_prefix("/blog/") {
                    // A trailing `/blog/` with no id keeps the default shell.
                    if !id.is_empty() {
                        return Route::BlogPost(id.to_string());
                    }
                }
                Route::Other
            }
        }
    }
}

fn has_asset_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .map(|(_, ext)| ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Meta description for an article: the excerpt, or the first 160 characters
/// of the content when no excerpt was written.
fn blog_post_description(post: &BlogPost) -> String {
    if post.excerpt.is_empty() {
        post.content.chars().take(160).collect()
    } else {
        post.excerpt.clone()
    }
}

/// Render the document for a request path. Upstream failures are recovered in
/// place; the only error here is initial-data serialization, which the HTTP
/// layer answers with [`fallback_shell`].
pub async fn render_route(fetcher: &ContentFetcher, raw_path: &str) -> Result<String, RenderError> {
    let path = normalize_path(raw_path);
    let canonical = if path.is_empty() || path == "/" {
        SITE_ORIGIN.to_string()
    } else {
        format!("{}{}", SITE_ORIGIN, path)
    };

    let mut seo = SeoData {
        url: Some(canonical),
        ..SeoData::default()
    };
    let mut initial = InitialData::default();

    match Route::parse(path) {
        Route::Home => {
            let (personal, projects, work) = tokio::join!(
                fetcher.personal(),
                fetcher.projects(),
                fetcher.work_experience()
            );
            // All-or-nothing fan-in: a single failure discards every result
            // and keeps the default SEO data.
            match (personal, projects, work) {
                (Ok(personal), Ok(projects), Ok(work)) => {
                    seo.title = Some(format!("{} - {}", personal.name, personal.title));
                    seo.description = Some(personal.summary.clone());
                    initial.personal = Some(personal);
                    initial.projects = Some(projects);
                    initial.work_experience = Some(work);
                }
                _ => {
                    tracing::warn!("home route content fetch failed, rendering with defaults");
                }
            }
        }
        Route::BlogPost(id) => match fetcher.blog_post(&id).await {
            Ok(post) => {
                let mut tags = vec![post.category.clone()];
                tags.extend(ARTICLE_EXTRA_TAGS.iter().map(|t| t.to_string()));
                seo = SeoData {
                    title: Some(format!("{} | {}", post.title, SITE_AUTHOR)),
                    description: Some(blog_post_description(&post)),
                    kind: PageKind::Article,
                    published_time: Some(post.date.clone()),
                    tags,
                    url: Some(format!("{}/blog/{}", SITE_ORIGIN, id)),
                    ..SeoData::default()
                };
                initial.blog_post = Some(post);
            }
            Err(err) => {
                tracing::warn!("blog post {} fetch failed, rendering with defaults: {}", id, err);
            }
        },
        Route::BlogIndex => match fetcher.blog_posts().await {
            Ok(posts) => {
                seo.title = Some(BLOG_TITLE.to_string());
                seo.description = Some(BLOG_DESCRIPTION.to_string());
                initial.blog_posts = Some(posts);
            }
            Err(err) => {
                tracing::warn!("blog index fetch failed, rendering with defaults: {}", err);
            }
        },
        // Assets are rejected by the HTTP layer before rendering; if one ever
        // reaches this point it gets the default shell like any other path.
        Route::Asset | Route::Other => {}
    }

    html_document(&seo, &initial)
}

/// Assemble the final document: head with meta tags and critical CSS, mount
/// element, embedded initial-data blob, client entry script.
fn html_document(seo: &SeoData, initial: &InitialData) -> Result<String, RenderError> {
    let meta_tags = generate_meta_tags(seo);
    let blob = serde_json::to_string(initial)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  {meta_tags}
  <style id="ssr-styles">{CRITICAL_CSS}</style>
</head>
<body>
  <div id="{MOUNT_ID}"></div>
  <script>window.__INITIAL_DATA__ = {blob};</script>
  <script type="module" src="{CLIENT_ENTRY}"></script>
</body>
</html>"#
    ))
}

/// Minimal static document used when rendering itself fails: just the mount
/// element and the client entry, so the page still boots client-side.
pub fn fallback_shell() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="description" content="Oludotun Longe - Senior Software Engineer">
  <title>Oludotun Longe - Senior Software Engineer</title>
</head>
<body>
  <div id="{MOUNT_ID}"></div>
  <script type="module" src="{CLIENT_ENTRY}"></script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_parsing_matches_the_path_shapes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/blog"), Route::BlogIndex);
        assert_eq!(Route::parse("/blog/42"), Route::BlogPost("42".to_string()));
        assert_eq!(Route::parse("/about"), Route::Other);
        assert_eq!(Route::parse("/blog/"), Route::Other);
    }

    #[test]
    fn query_string_and_fragment_are_stripped() {
        assert_eq!(Route::parse("/?utm=x"), Route::Home);
        assert_eq!(Route::parse("/blog/42?ref=home"), Route::BlogPost("42".to_string()));
        assert_eq!(Route::parse("/blog#latest"), Route::BlogIndex);
    }

    #[test]
    fn assets_and_api_paths_short_circuit() {
        assert_eq!(Route::parse("/unknown.png"), Route::Asset);
        assert_eq!(Route::parse("/bundle.v2.JS"), Route::Asset);
        assert_eq!(Route::parse("/fonts/inter.woff2"), Route::Asset);
        assert_eq!(Route::parse("/api/personal"), Route::Asset);
        assert_eq!(Route::parse("/_next/static/chunk"), Route::Asset);
        // A dot in a directory segment is not an asset extension.
        assert_eq!(Route::parse("/v1.0/about"), Route::Other);
    }

    #[test]
    fn blog_post_description_prefers_the_excerpt() {
        let mut post = BlogPost {
            id: "42".into(),
            title: "T".into(),
            excerpt: "short".into(),
            content: "long content".into(),
            date: "2025-01-01".into(),
            category: "SciFi".into(),
        };
        assert_eq!(blog_post_description(&post), "short");

        post.excerpt = String::new();
        post.content = "x".repeat(200);
        assert_eq!(blog_post_description(&post).len(), 160);

        // Multi-byte content truncates on character boundaries.
        post.content = "é".repeat(200);
        assert_eq!(blog_post_description(&post).chars().count(), 160);
    }

    #[test]
    fn document_embeds_blob_mount_and_entry() {
        let html = html_document(&SeoData::default(), &InitialData::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="root"></div>"#));
        assert!(html.contains("window.__INITIAL_DATA__ = {};"));
        assert!(html.contains(CLIENT_ENTRY));
        assert!(html.contains(r#"<style id="ssr-styles">"#));
    }

    #[test]
    fn fallback_shell_is_static_and_bootable() {
        let html = fallback_shell();
        assert!(html.contains(r#"<div id="root"></div>"#));
        assert!(html.contains(CLIENT_ENTRY));
        assert!(!html.contains("__INITIAL_DATA__"));
    }
}
