//! # curio-registry
//!
//! HTTP clients for the GitHub and GitLab REST APIs, used by the enrichment
//! step to fetch repository metadata (stars, last activity, archived flag)
//! and the latest release.

mod error;
mod github;
mod gitlab;
mod http;
mod release;

pub use error::RegistryError;
pub use github::{GitHubClient, RepoMetadata};
pub use gitlab::GitLabClient;
pub use release::ReleaseMetadata;

/// Default GitHub API endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Default GitLab API endpoint.
pub const GITLAB_API_BASE: &str = "https://gitlab.com/api/v4";
