use std::time::Duration;

use curio_core::{Enrichment, Release, Software};
use curio_registry::ReleaseMetadata;
use curio_store::{Catalog, PendingWrite, Store};

use crate::error::{EnrichError, ItemError};
use crate::pacer::RequestPacer;
use crate::repo::RepoRef;
use crate::source::{MetadataSource, RemoteMetadata};

/// A software item that was left untouched this run.
#[derive(Debug)]
pub struct ItemFailure {
    pub name: String,
    pub repo: RepoRef,
    pub error: ItemError,
}

/// Outcome of one enrichment run.
#[derive(Debug, Default)]
pub struct EnrichReport {
    /// Items with a recognized repository URL that were fetched.
    pub eligible: usize,
    /// Items without a repository URL on a served host.
    pub unsupported: usize,
    /// Items skipped because their enrichment block is already complete.
    pub complete: usize,
    /// Items whose record was rewritten.
    pub updated: usize,
    /// Items fetched without any change.
    pub unchanged: usize,
    pub failures: Vec<ItemFailure>,
}

/// A merged record waiting for the write phase.
struct Staged {
    position: usize,
    repo: RepoRef,
    previous: Enrichment,
    write: PendingWrite,
}

/// Runs the metadata step over a catalog.
pub struct Enricher<S> {
    source: S,
    pacer: RequestPacer,
    only_missing: bool,
}

impl<S: MetadataSource> Enricher<S> {
    pub fn new(source: S, request_delay: Duration) -> Self {
        Self {
            source,
            pacer: RequestPacer::new(request_delay),
            only_missing: false,
        }
    }

    #[must_use]
    pub fn only_missing(mut self, only_missing: bool) -> Self {
        self.only_missing = only_missing;
        self
    }

    /// Fetch metadata for every eligible item, merge it, then write changed
    /// records back through `store`.
    ///
    /// Requests are issued one at a time. Nothing is written unless every
    /// request completes without a fatal error. Every changed record is then
    /// rendered and checked before the first file is written. A fetch, render
    /// or write failure is recorded in the report and leaves that item
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Aborted`] when the API rejects the credential.
    pub async fn run(
        &mut self,
        store: &Store,
        catalog: &mut Catalog,
    ) -> Result<EnrichReport, EnrichError> {
        let mut report = EnrichReport::default();
        let mut fetched = Vec::new();

        for (position, record) in catalog.software.iter().enumerate() {
            let software = record.entity();
            let Some(repo) = software
                .source_code_url
                .as_deref()
                .and_then(RepoRef::parse)
                .filter(|repo| self.source.serves(repo.provider))
            else {
                tracing::debug!(name = %software.name, "no supported repository url, skipping");
                report.unsupported += 1;
                continue;
            };
            if self.only_missing && software.enrichment().is_complete() {
                tracing::debug!(name = %software.name, "metadata already present, skipping");
                report.complete += 1;
                continue;
            }
            report.eligible += 1;

            self.pacer.ready().await;
            tracing::info!(name = %software.name, provider = %repo.provider, %repo, "fetching repository metadata");
            let result = self.source.fetch(&repo).await;
            self.pacer.finished();

            match result {
                Ok(remote) => fetched.push((position, repo, merged(software, &remote))),
                Err(error) if error.is_fatal() => {
                    return Err(EnrichError::Aborted {
                        name: software.name.clone(),
                        source: error,
                    });
                }
                Err(error) => {
                    tracing::warn!(name = %software.name, %repo, %error, "failed to fetch repository metadata");
                    report.failures.push(ItemFailure {
                        name: software.name.clone(),
                        repo,
                        error: error.into(),
                    });
                }
            }
        }

        let mut staged = Vec::new();
        for (position, repo, enrichment) in fetched {
            let record = &mut catalog.software[position];
            let previous = record.entity().enrichment();
            if !record.entity_mut().apply_enrichment(enrichment) {
                report.unchanged += 1;
                continue;
            }
            match store.prepare_software(record) {
                Ok(Some(write)) => staged.push(Staged {
                    position,
                    repo,
                    previous,
                    write,
                }),
                Ok(None) => report.unchanged += 1,
                Err(error) => {
                    record.entity_mut().apply_enrichment(previous);
                    let name = record.entity().name.clone();
                    tracing::warn!(%name, path = %record.path().display(), %error, "cannot update record");
                    report.failures.push(ItemFailure {
                        name,
                        repo,
                        error: error.into(),
                    });
                }
            }
        }

        for item in staged {
            let record = &mut catalog.software[item.position];
            match store.commit(record, item.write) {
                Ok(()) => report.updated += 1,
                Err(error) => {
                    record.entity_mut().apply_enrichment(item.previous);
                    let name = record.entity().name.clone();
                    tracing::warn!(%name, path = %record.path().display(), %error, "failed to write record");
                    report.failures.push(ItemFailure {
                        name,
                        repo: item.repo,
                        error: error.into(),
                    });
                }
            }
        }

        tracing::info!(
            eligible = report.eligible,
            updated = report.updated,
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "enrichment finished"
        );
        Ok(report)
    }
}

/// Remote values win for the enrichment fields. A missing remote activity
/// date or release keeps the local one.
fn merged(software: &Software, remote: &RemoteMetadata) -> Enrichment {
    Enrichment {
        stargazers_count: Some(remote.repo.stargazers_count),
        updated_at: remote.repo.last_activity().or(software.updated_at),
        archived: Some(remote.repo.archived),
        current_release: remote
            .release
            .as_ref()
            .and_then(release)
            .or_else(|| software.current_release.clone()),
    }
}

fn release(metadata: &ReleaseMetadata) -> Option<Release> {
    Some(Release {
        tag: metadata.tag_name.clone(),
        published_at: metadata.release_date()?.format("%Y-%m-%d").to_string(),
    })
}
