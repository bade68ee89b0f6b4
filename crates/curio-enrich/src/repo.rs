use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static GITHUB_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+?)/?$")
        .expect("valid repository url regex")
});

static GITLAB_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://gitlab\.com/([A-Za-z0-9_.-]+(?:/[A-Za-z0-9_.-]+)+?)/?$")
        .expect("valid project url regex")
});

/// Repository hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    GitHub,
    GitLab,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        })
    }
}

/// A repository on a supported host: `owner/repo` on GitHub, or a project
/// path with any number of groups on GitLab.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub provider: Provider,
    pub path: String,
}

impl RepoRef {
    /// Parse a repository home page URL such as `https://github.com/foo/bar`
    /// or `https://gitlab.com/group/sub/project`.
    ///
    /// Deeper pages, other hosts and plain `http` are not recognized.
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        if let Some(captures) = GITHUB_REPO.captures(url) {
            return Some(Self {
                provider: Provider::GitHub,
                path: captures[1].to_string(),
            });
        }
        let path = GITLAB_PROJECT.captures(url)?.get(1)?.as_str();
        // `/-/` starts a GitLab sub-page (tree, issues, ...).
        if path.split('/').any(|segment| segment == "-") {
            return None;
        }
        Some(Self {
            provider: Provider::GitLab,
            path: path.to_string(),
        })
    }

    /// Owner and repository name of a two-segment path.
    #[must_use]
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        self.path.split_once('/')
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
