//! GitHub repository metadata.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::http::check_response;
use crate::release::ReleaseMetadata;

/// The subset of `GET /repos/{owner}/{repo}` that enrichment uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    pub stargazers_count: u64,
    #[serde(default)]
    pub archived: bool,
    /// Last push to any branch.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    /// Last change to the repository object itself.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepoMetadata {
    /// Date of last upstream activity: the last push, or the last repository
    /// update when the repository was never pushed to.
    #[must_use]
    pub fn last_activity(&self) -> Option<NaiveDate> {
        self.pushed_at
            .or(self.updated_at)
            .map(|at| at.date_naive())
    }
}

/// HTTP client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for `base_url` (normally [`crate::GITHUB_API_BASE`]).
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

    /// Fetch metadata for `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be parsed.
    pub async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<RepoMetadata, RegistryError> {
        let url = format!("{}/repos/{}", self.base_url, repo_path(owner, repo));
        tracing::debug!(%url, "fetching repository metadata");
        let body = self.get(&url).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| RegistryError::Parse(format!("{owner}/{repo}: {e}")))
    }

    /// Fetch the latest published release of `owner/repo`, or `None` when the
    /// repository has no release.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_repo`], except that 404 means no release.
    pub async fn fetch_latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<ReleaseMetadata>, RegistryError> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, repo_path(owner, repo));
        tracing::debug!(%url, "fetching latest release");
        let resp = match self.get(&url).await {
            Ok(resp) => resp,
            Err(RegistryError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| RegistryError::Parse(format!("{owner}/{repo} release: {e}")))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        check_response(request.send().await?).await
    }
}

fn repo_path(owner: &str, repo: &str) -> String {
    format!("{}/{}", urlencoding::encode(owner), urlencoding::encode(repo))
}
