//! Content payloads matching the content API contract, plus the hydration blob.
//!
//! Payloads pass through the gateway mostly untouched: the renderer reads a
//! handful of fields for SEO overrides and never validates the rest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owner profile returned by `GET /personal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_by_category: Option<HashMap<String, Vec<String>>>,
}

/// Portfolio project returned by `GET /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub highlight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Employment entry returned by `GET /work-experience`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub funding: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Full article returned by `GET /blog/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

/// Article listing entry returned by `GET /blog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

/// Per-request blob embedded in the rendered page as `window.__INITIAL_DATA__`.
///
/// Constructed once per SSR request, serialized into the response, read
/// exactly once at client bootstrap, then discarded — the query cache becomes
/// the source of truth afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal: Option<PersonalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<WorkExperience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_post: Option<BlogPost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_posts: Option<Vec<BlogPostSummary>>,
    /// Legacy embedding format: serialized cache key -> payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<HashMap<String, Value>>,
}

impl InitialData {
    /// True when no route data was attached (the serialized form is `{}`).
    pub fn is_empty(&self) -> bool {
        self.personal.is_none()
            && self.projects.is_none()
            && self.work_experience.is_none()
            && self.blog_post.is_none()
            && self.blog_posts.is_none()
            && self.queries.is_none()
    }
}
