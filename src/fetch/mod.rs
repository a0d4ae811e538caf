//! Content API client.
//!
//! One shared [`reqwest::Client`] per process; every call classifies its
//! failure into an [`ApiError`] variant so callers can recover explicitly.
//! No retries here — retry policy belongs to the client data layer.

use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use crate::models::{BlogPost, BlogPostSummary, PersonalInfo, Project, WorkExperience};

/// Read-only client for the content API.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl ContentFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GET `{base}{endpoint}` and decode the JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Api`], preferring the upstream
    /// `{error}` or `{message}` body field for the message when present.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
            let mut message = format!("API error: {}", status_text);
            if let Ok(body) = response.json::<serde_json::Value>().await {
                let upstream = body
                    .get("error")
                    .and_then(|v| v.as_str())
                    .or_else(|| body.get("message").and_then(|v| v.as_str()));
                if let Some(upstream) = upstream {
                    message = upstream.to_string();
                }
            }
            return Err(ApiError::Api {
                message,
                status: status.as_u16(),
                status_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn personal(&self) -> Result<PersonalInfo, ApiError> {
        self.get_json("/personal").await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/projects").await
    }

    pub async fn work_experience(&self) -> Result<Vec<WorkExperience>, ApiError> {
        self.get_json("/work-experience").await
    }

    pub async fn blog_posts(&self) -> Result<Vec<BlogPostSummary>, ApiError> {
        self.get_json("/blog").await
    }

    pub async fn blog_post(&self, id: &str) -> Result<BlogPost, ApiError> {
        self.get_json(&format!("/blog/{}", id)).await
    }
}
