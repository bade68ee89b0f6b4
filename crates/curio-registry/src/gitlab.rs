//! GitLab project metadata.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::github::RepoMetadata;
use crate::http::check_response;
use crate::release::ReleaseMetadata;

/// The subset of `GET /projects/:id` that enrichment uses.
#[derive(Debug, Deserialize)]
struct Project {
    path_with_namespace: String,
    star_count: u64,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    last_activity_at: Option<DateTime<Utc>>,
}

impl From<Project> for RepoMetadata {
    fn from(project: Project) -> Self {
        Self {
            full_name: project.path_with_namespace,
            stargazers_count: project.star_count,
            archived: project.archived,
            pushed_at: project.last_activity_at,
            updated_at: None,
        }
    }
}

/// HTTP client for the GitLab REST API (v4).
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitLabClient {
    /// Create a client for `base_url` (normally [`crate::GITLAB_API_BASE`]).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying client fails to build.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("curio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch metadata for the project at `path` (`group/subgroup/project`).
    ///
    /// The last activity date stands in for the last push.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn fetch_project(&self, path: &str) -> Result<RepoMetadata, RegistryError> {
        let url = format!("{}/projects/{}", self.base_url, urlencoding::encode(path));
        tracing::debug!(%url, "fetching project metadata");
        let body = self.get(&url).await?.text().await?;
        serde_json::from_str::<Project>(&body)
            .map(RepoMetadata::from)
            .map_err(|e| RegistryError::Parse(format!("{path}: {e}")))
    }

    /// Fetch the most recent release of the project at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_project`].
    pub async fn fetch_latest_release(
        &self,
        path: &str,
    ) -> Result<Option<ReleaseMetadata>, RegistryError> {
        let url = format!(
            "{}/projects/{}/releases?per_page=1&order_by=released_at&sort=desc",
            self.base_url,
            urlencoding::encode(path)
        );
        tracing::debug!(%url, "fetching latest release");
        let body = self.get(&url).await?.text().await?;
        serde_json::from_str::<Vec<ReleaseMetadata>>(&body)
            .map(|releases| releases.into_iter().next())
            .map_err(|e| RegistryError::Parse(format!("{path} releases: {e}")))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", token);
        }
        check_response(request.send().await?).await
    }
}
