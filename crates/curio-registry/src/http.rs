//! Shared HTTP response checks.
//!
//! Maps the status codes GitHub and GitLab use for credential, visibility and
//! quota failures onto [`RegistryError`] variants so callers can tell a fatal
//! batch-level failure from a per-item one.

use crate::error::RegistryError;

// GitHub spells the quota headers with an `x-` prefix, GitLab without.
const RATE_LIMIT_REMAINING: [&str; 2] = ["x-ratelimit-remaining", "ratelimit-remaining"];
const RATE_LIMIT_RESET: [&str; 2] = ["x-ratelimit-reset", "ratelimit-reset"];
const DEFAULT_RETRY_SECS: u64 = 60;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. Otherwise:
/// - **401** → [`RegistryError::Unauthorized`]
/// - **403** with a remaining quota of 0, or **429** →
///   [`RegistryError::RateLimited`]
/// - **404** → [`RegistryError::NotFound`]
/// - any other non-success status → [`RegistryError::Api`]
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
    let status = resp.status().as_u16();
    match status {
        401 => return Err(RegistryError::Unauthorized),
        403 if quota_exhausted(&resp) => {
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after(&resp),
            });
        }
        404 => return Err(RegistryError::NotFound(resp.url().path().to_string())),
        429 => {
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after(&resp),
            });
        }
        _ => {}
    }
    if !resp.status().is_success() {
        return Err(RegistryError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn header<'r>(resp: &'r reqwest::Response, name: &str) -> Option<&'r str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

fn first_header<'r>(resp: &'r reqwest::Response, names: &[&str]) -> Option<&'r str> {
    names.iter().find_map(|name| header(resp, name))
}

fn quota_exhausted(resp: &reqwest::Response) -> bool {
    first_header(resp, &RATE_LIMIT_REMAINING).is_some_and(|v| v.trim() == "0")
}

/// Seconds to wait: `Retry-After`, else the distance to the quota reset time,
/// else 60.
fn retry_after(resp: &reqwest::Response) -> u64 {
    if let Some(secs) = header(resp, reqwest::header::RETRY_AFTER.as_str())
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        return secs;
    }
    first_header(resp, &RATE_LIMIT_RESET)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|reset| reset - chrono::Utc::now().timestamp())
        .and_then(|secs| u64::try_from(secs).ok())
        .unwrap_or(DEFAULT_RETRY_SECS)
}
