//! # curio-enrich
//!
//! Fills the enrichment block of software records (stars, last activity,
//! archived flag, latest release) from the GitHub and GitLab APIs.
//!
//! Requests run strictly one after another, spaced by a [`RequestPacer`].
//! Remote values overwrite only the enrichment fields; every other field and
//! the layout of the record file are left alone.

mod credential;
mod engine;
mod error;
mod pacer;
mod repo;
mod source;

pub use credential::Credential;
pub use engine::{EnrichReport, Enricher, ItemFailure};
pub use error::{EnrichError, ItemError};
pub use pacer::RequestPacer;
pub use repo::{Provider, RepoRef};
pub use source::{HostedSource, MetadataSource, RemoteMetadata};

use curio_config::EnrichConfig;
use curio_registry::{GitHubClient, GitLabClient};
use curio_store::Catalog;

/// Build an enricher for `catalog` from configuration.
///
/// A client is created for each host the catalog links to, and the token of
/// that host is checked before any request is made. Hosts with no linked
/// item need no token.
///
/// # Errors
///
/// Returns [`EnrichError::MissingCredential`] or
/// [`EnrichError::MalformedCredential`] for a bad token, or
/// [`EnrichError::Registry`] if an HTTP client cannot be built.
pub fn hosted_enricher(
    config: &EnrichConfig,
    catalog: &Catalog,
) -> Result<Enricher<HostedSource>, EnrichError> {
    let links = |provider| {
        catalog.software.iter().any(|record| {
            record
                .entity()
                .source_code_url
                .as_deref()
                .and_then(RepoRef::parse)
                .is_some_and(|repo| repo.provider == provider)
        })
    };

    let github = if links(Provider::GitHub) {
        let credential = Credential::from_env(&config.token_env)?;
        Some(GitHubClient::new(
            config.api_base_url.clone(),
            Some(credential.expose().to_string()),
            config.timeout(),
        )?)
    } else {
        None
    };
    let gitlab = if links(Provider::GitLab) {
        let credential = Credential::from_env(&config.gitlab_token_env)?;
        Some(GitLabClient::new(
            config.gitlab_api_base_url.clone(),
            Some(credential.expose().to_string()),
            config.timeout(),
        )?)
    } else {
        None
    };

    let source = HostedSource::new(github, gitlab);
    Ok(Enricher::new(source, config.request_delay()).only_missing(config.only_missing))
}
