use std::collections::HashSet;

use curio_config::CheckUrlsConfig;
use curio_core::EntityKind;
use curio_store::Catalog;
use regex::Regex;
use serde::Serialize;

use crate::error::LinkCheckError;
use crate::targets::{Target, collect};

/// Status codes of a live link. 206 answers the `Range` request.
const VALID_STATUS: [u16; 2] = [200, 206];

/// A URL that did not answer with a valid status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadLink {
    pub kind: EntityKind,
    pub owner: String,
    pub key: String,
    pub url: String,
    /// `HTTP <status>` or the transport error.
    pub reason: String,
}

/// Outcome of one link check.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    /// Distinct URLs requested.
    pub checked: usize,
    pub ok: usize,
    /// URL occurrences matching an exclusion pattern.
    pub skipped: usize,
    pub dead: Vec<DeadLink>,
}

/// Requests every catalog URL once, one after another.
#[derive(Debug, Clone)]
pub struct UrlChecker {
    http: reqwest::Client,
    keys: Vec<String>,
    exclude: Vec<Regex>,
}

impl UrlChecker {
    /// # Errors
    ///
    /// Returns [`LinkCheckError::Config`] for an invalid exclusion pattern,
    /// or [`LinkCheckError::Http`] if the client cannot be built.
    pub fn new(config: &CheckUrlsConfig) -> Result<Self, LinkCheckError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("curio/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            keys: config.check_keys.clone(),
            exclude: config.exclude_patterns()?,
        })
    }

    pub async fn check_catalog(&self, catalog: &Catalog) -> CheckReport {
        let targets = collect(catalog, &self.keys);
        let total = targets.len();
        let mut report = CheckReport::default();
        let mut seen = HashSet::new();

        for (position, target) in targets.iter().enumerate() {
            if self.exclude.iter().any(|pattern| pattern.is_match(target.url)) {
                tracing::debug!(url = target.url, "skipping excluded url");
                report.skipped += 1;
                continue;
            }
            if !seen.insert(target.url) {
                continue;
            }
            report.checked += 1;
            match self.check_url(target.url).await {
                Ok(status) => {
                    tracing::info!(item = position + 1, total, url = target.url, status, "link ok");
                    report.ok += 1;
                }
                Err(reason) => {
                    tracing::error!(item = position + 1, total, url = target.url, %reason, "dead link");
                    report.dead.push(dead_link(target, reason));
                }
            }
        }

        tracing::info!(
            ok = report.ok,
            skipped = report.skipped,
            dead = report.dead.len(),
            "link check finished"
        );
        report
    }

    /// Request the first bytes of `url`. Servers that ignore `Range` send the
    /// whole page.
    ///
    /// # Errors
    ///
    /// Returns the reason the link counts as dead.
    pub async fn check_url(&self, url: &str) -> Result<u16, String> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::RANGE, "bytes=0-200")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        if VALID_STATUS.contains(&status) {
            Ok(status)
        } else {
            Err(format!("HTTP {status}"))
        }
    }
}

fn dead_link(target: &Target<'_>, reason: String) -> DeadLink {
    DeadLink {
        kind: target.kind,
        owner: target.owner.to_string(),
        key: target.key.to_string(),
        url: target.url.to_string(),
        reason,
    }
}
