//! Latest release of a repository.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The newest published release, as reported by GitHub
/// (`tag_name`, `published_at`) or GitLab (`tag_name`, `released_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    pub tag_name: String,
    #[serde(default, alias = "released_at")]
    pub published_at: Option<DateTime<Utc>>,
}

impl ReleaseMetadata {
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.published_at.map(|at| at.date_naive())
    }
}
