use std::future::Future;

use curio_registry::{GitHubClient, GitLabClient, RegistryError, ReleaseMetadata, RepoMetadata};

use crate::repo::{Provider, RepoRef};

/// What a host reports about one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMetadata {
    pub repo: RepoMetadata,
    pub release: Option<ReleaseMetadata>,
}

/// Where repository metadata comes from.
pub trait MetadataSource {
    /// Whether repositories on `provider` can be fetched at all.
    fn serves(&self, _provider: Provider) -> bool {
        true
    }

    fn fetch(
        &self,
        repo: &RepoRef,
    ) -> impl Future<Output = Result<RemoteMetadata, RegistryError>> + Send;
}

/// One API client per hosting service; a host without a client is not
/// served.
#[derive(Debug, Clone, Default)]
pub struct HostedSource {
    github: Option<GitHubClient>,
    gitlab: Option<GitLabClient>,
}

impl HostedSource {
    #[must_use]
    pub const fn new(github: Option<GitHubClient>, gitlab: Option<GitLabClient>) -> Self {
        Self { github, gitlab }
    }
}

impl MetadataSource for HostedSource {
    fn serves(&self, provider: Provider) -> bool {
        match provider {
            Provider::GitHub => self.github.is_some(),
            Provider::GitLab => self.gitlab.is_some(),
        }
    }

    async fn fetch(&self, repo: &RepoRef) -> Result<RemoteMetadata, RegistryError> {
        match (repo.provider, &self.github, &self.gitlab) {
            (Provider::GitHub, Some(client), _) => {
                let (owner, name) = repo
                    .owner_and_name()
                    .ok_or_else(|| RegistryError::Unsupported(repo.to_string()))?;
                Ok(RemoteMetadata {
                    repo: client.fetch_repo(owner, name).await?,
                    release: client.fetch_latest_release(owner, name).await?,
                })
            }
            (Provider::GitLab, _, Some(client)) => Ok(RemoteMetadata {
                repo: client.fetch_project(&repo.path).await?,
                release: client.fetch_latest_release(&repo.path).await?,
            }),
            _ => Err(RegistryError::Unsupported(format!("{} ({})", repo, repo.provider))),
        }
    }
}
