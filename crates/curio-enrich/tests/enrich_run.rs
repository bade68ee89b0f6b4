use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use curio_config::EnrichConfig;
use curio_core::Release;
use curio_enrich::{
    EnrichError, Enricher, HostedSource, ItemError, MetadataSource, Provider, RemoteMetadata,
    RepoRef, hosted_enricher,
};
use curio_registry::{GitHubClient, GitLabClient, RegistryError, ReleaseMetadata, RepoMetadata};
use curio_store::Store;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory metadata source that records every request.
#[derive(Default)]
struct FakeSource {
    repos: HashMap<String, RemoteMetadata>,
    /// Repository for which the API rejects the token.
    reject: Option<&'static str>,
    /// Serve only GitHub repositories.
    github_only: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    fn with_repo(mut self, path: &str, stars: u64, pushed: (i32, u32, u32), archived: bool) -> Self {
        let pushed_at = Utc
            .with_ymd_and_hms(pushed.0, pushed.1, pushed.2, 12, 0, 0)
            .single();
        self.repos.insert(
            path.to_string(),
            RemoteMetadata {
                repo: RepoMetadata {
                    full_name: path.to_string(),
                    stargazers_count: stars,
                    archived,
                    pushed_at,
                    updated_at: pushed_at,
                },
                release: None,
            },
        );
        self
    }

    fn with_release(mut self, path: &str, tag: &str, published: (i32, u32, u32)) -> Self {
        if let Some(remote) = self.repos.get_mut(path) {
            remote.release = Some(ReleaseMetadata {
                tag_name: tag.to_string(),
                published_at: Utc
                    .with_ymd_and_hms(published.0, published.1, published.2, 8, 0, 0)
                    .single(),
            });
        }
        self
    }
}

impl MetadataSource for FakeSource {
    fn serves(&self, provider: Provider) -> bool {
        !self.github_only || provider == Provider::GitHub
    }

    async fn fetch(&self, repo: &RepoRef) -> Result<RemoteMetadata, RegistryError> {
        let key = repo.to_string();
        self.calls.lock().unwrap().push(key.clone());
        if self.reject == Some(key.as_str()) {
            return Err(RegistryError::Unauthorized);
        }
        self.repos
            .get(&key)
            .cloned()
            .ok_or(RegistryError::NotFound(key))
    }
}

const FOO: &str = "\
name: Foo
website_url: https://foo.example.org
source_code_url: https://github.com/foo/foo
description: Foo does wikis.
licenses:
  - MIT
platforms:
  - Python
tags:
  - Wikis
";

const BAR: &str = "\
name: Bar
website_url: https://bar.example.org
source_code_url: https://github.com/bar/bar
description: Bar does blogs.
licenses: [MIT]
platforms: [Go]
tags: [Blogging]
";

const BAZ: &str = "\
name: Baz
website_url: https://baz.example.org
source_code_url: https://gitlab.com/baz/baz
description: Baz is on GitLab.
licenses: [MIT]
platforms: [Go]
tags: [Blogging]
";

fn fixture_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let software = dir.path().join("software");
    fs::create_dir_all(&software).unwrap();
    fs::create_dir_all(dir.path().join("tags")).unwrap();
    fs::create_dir_all(dir.path().join("platforms")).unwrap();
    for (file, text) in files {
        fs::write(software.join(file), text).unwrap();
    }
    fs::write(dir.path().join("licenses.yml"), "- identifier: MIT\n  name: MIT\n  url: x\n").unwrap();
    dir
}

fn fixture() -> TempDir {
    fixture_with(&[("foo.yml", FOO), ("bar.yml", BAR), ("baz.yml", BAZ)])
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join("software").join(file)).unwrap()
}

fn licenses() -> Vec<String> {
    vec!["licenses.yml".into()]
}

fn all_three() -> FakeSource {
    FakeSource::default()
        .with_repo("foo/foo", 120, (2024, 6, 1), false)
        .with_repo("bar/bar", 3, (2019, 1, 15), true)
        .with_repo("baz/baz", 4, (2024, 5, 2), false)
}

#[tokio::test]
async fn merges_remote_metadata_and_writes_back() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let source = all_three().with_release("baz/baz", "v0.3", (2024, 5, 1));
    let mut enricher = Enricher::new(source, Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert_eq!(report.eligible, 3);
    assert_eq!(report.unsupported, 0);
    assert_eq!(report.updated, 3);
    assert!(report.failures.is_empty());

    assert_eq!(
        read(dir.path(), "foo.yml"),
        format!("{FOO}stargazers_count: 120\nupdated_at: 2024-06-01\narchived: false\n")
    );
    assert!(read(dir.path(), "baz.yml").starts_with(&format!(
        "{BAZ}stargazers_count: 4\nupdated_at: 2024-05-02\narchived: false\ncurrent_release:\n  tag: v0.3\n"
    )));

    let reloaded = store.load(&licenses()).unwrap();
    let baz = reloaded
        .software
        .iter()
        .find(|r| r.entity().name == "Baz")
        .unwrap()
        .entity();
    assert_eq!(
        baz.current_release,
        Some(Release {
            tag: "v0.3".into(),
            published_at: "2024-05-01".into(),
        })
    );

    let bar = catalog
        .software
        .iter()
        .find(|r| r.entity().name == "Bar")
        .unwrap()
        .entity();
    assert_eq!(bar.updated_at, NaiveDate::from_ymd_opt(2019, 1, 15));
    assert_eq!(bar.archived, Some(true));
}

#[tokio::test]
async fn unserved_hosts_are_unsupported() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let source = FakeSource {
        github_only: true,
        ..all_three()
    };
    let calls = Arc::clone(&source.calls);
    let mut enricher = Enricher::new(source, Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert_eq!(report.eligible, 2);
    assert_eq!(report.unsupported, 1);
    assert_eq!(*calls.lock().unwrap(), vec!["bar/bar", "foo/foo"]);
    assert_eq!(read(dir.path(), "baz.yml"), BAZ);
}

#[tokio::test]
async fn second_only_missing_run_changes_nothing() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();

    let mut enricher = Enricher::new(all_three(), Duration::ZERO).only_missing(true);

    let mut catalog = store.load(&licenses()).unwrap();
    enricher.run(&store, &mut catalog).await.unwrap();
    let foo_after_first = read(dir.path(), "foo.yml");
    let bar_after_first = read(dir.path(), "bar.yml");

    let mut catalog = store.load(&licenses()).unwrap();
    let report = enricher.run(&store, &mut catalog).await.unwrap();
    assert_eq!(report.eligible, 0);
    assert_eq!(report.complete, 3);
    assert_eq!(report.updated, 0);
    assert_eq!(read(dir.path(), "foo.yml"), foo_after_first);
    assert_eq!(read(dir.path(), "bar.yml"), bar_after_first);
}

#[tokio::test]
async fn refetching_identical_metadata_is_unchanged() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let source = FakeSource::default()
        .with_repo("foo/foo", 1, (2024, 1, 1), false)
        .with_repo("bar/bar", 1, (2024, 1, 1), false)
        .with_repo("baz/baz", 1, (2024, 1, 1), false);
    let mut enricher = Enricher::new(source, Duration::ZERO);

    let mut catalog = store.load(&licenses()).unwrap();
    enricher.run(&store, &mut catalog).await.unwrap();
    let report = enricher.run(&store, &mut catalog).await.unwrap();
    assert_eq!(report.eligible, 3);
    assert_eq!(report.updated, 0);
    assert_eq!(report.unchanged, 3);
}

#[tokio::test]
async fn per_item_failure_does_not_abort_the_batch() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let source = FakeSource::default()
        .with_repo("foo/foo", 9, (2024, 2, 2), false)
        .with_repo("baz/baz", 1, (2024, 2, 2), false);
    let mut enricher = Enricher::new(source, Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Bar");
    assert!(matches!(
        report.failures[0].error,
        ItemError::Fetch(RegistryError::NotFound(_))
    ));
    assert_eq!(read(dir.path(), "bar.yml"), BAR);
}

#[tokio::test]
async fn quoted_enrichment_keys_are_updated_in_place() {
    let foo = format!("{FOO}\"stargazers_count\": 1\n");
    let dir = fixture_with(&[("foo.yml", &foo), ("bar.yml", BAR)]);
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let mut enricher = Enricher::new(all_three(), Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.updated, 2);
    assert_eq!(
        read(dir.path(), "foo.yml"),
        format!("{FOO}\"stargazers_count\": 120\nupdated_at: 2024-06-01\narchived: false\n")
    );
}

#[tokio::test]
async fn unwritable_layout_is_reported_per_item_and_others_are_written() {
    // A flow-style document cannot be patched line by line.
    let bar = "{name: Bar, website_url: \"https://bar.example.org\", source_code_url: \"https://github.com/bar/bar\"}\n";
    let dir = fixture_with(&[("foo.yml", FOO), ("bar.yml", bar), ("baz.yml", BAZ)]);
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let mut enricher = Enricher::new(all_three(), Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Bar");
    assert!(matches!(report.failures[0].error, ItemError::Write(_)));
    assert_eq!(read(dir.path(), "bar.yml"), bar);
    assert!(read(dir.path(), "foo.yml").contains("stargazers_count: 120\n"));
    assert!(read(dir.path(), "baz.yml").contains("stargazers_count: 4\n"));

    let bar_entity = catalog.software[0].entity();
    assert_eq!(bar_entity.name, "Bar");
    assert_eq!(bar_entity.stargazers_count, None);
}

#[tokio::test]
async fn rejected_credential_aborts_without_writing() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    // bar/bar is fetched successfully before foo/foo fails.
    let source = FakeSource {
        reject: Some("foo/foo"),
        ..all_three()
    };
    let mut enricher = Enricher::new(source, Duration::ZERO);
    let err = enricher.run(&store, &mut catalog).await.unwrap_err();

    assert!(matches!(err, EnrichError::Aborted { ref name, .. } if name == "Foo"));
    assert_eq!(read(dir.path(), "foo.yml"), FOO);
    assert_eq!(read(dir.path(), "bar.yml"), BAR);
    assert_eq!(read(dir.path(), "baz.yml"), BAZ);
}

#[tokio::test]
async fn requests_are_sequential_in_catalog_order() {
    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let source = FakeSource::default();
    let calls = Arc::clone(&source.calls);
    let mut enricher = Enricher::new(source, Duration::from_millis(20));
    let started = std::time::Instant::now();
    enricher.run(&store, &mut catalog).await.unwrap();

    // Files load sorted, so bar.yml comes first.
    assert_eq!(*calls.lock().unwrap(), vec!["bar/bar", "baz/baz", "foo/foo"]);
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[test]
fn missing_github_token_fails_before_any_request() {
    let dir = fixture();
    let catalog = Store::open(dir.path()).unwrap().load(&licenses()).unwrap();
    let config = EnrichConfig {
        token_env: "CURIO_TEST_TOKEN_NEVER_SET".into(),
        ..EnrichConfig::default()
    };
    let err = hosted_enricher(&config, &catalog).err().unwrap();
    assert!(matches!(err, EnrichError::MissingCredential { ref var } if var == "CURIO_TEST_TOKEN_NEVER_SET"));
}

#[test]
fn gitlab_token_is_required_only_for_gitlab_items() {
    let config = EnrichConfig {
        token_env: "CURIO_TEST_GITHUB_TOKEN_NEVER_SET".into(),
        gitlab_token_env: "CURIO_TEST_GITLAB_TOKEN_NEVER_SET".into(),
        ..EnrichConfig::default()
    };

    let dir = fixture_with(&[("baz.yml", BAZ)]);
    let catalog = Store::open(dir.path()).unwrap().load(&licenses()).unwrap();
    let err = hosted_enricher(&config, &catalog).err().unwrap();
    assert!(matches!(err, EnrichError::MissingCredential { ref var } if var == "CURIO_TEST_GITLAB_TOKEN_NEVER_SET"));

    let dir = fixture_with(&[]);
    let catalog = Store::open(dir.path()).unwrap().load(&licenses()).unwrap();
    assert!(hosted_enricher(&config, &catalog).is_ok());
}

#[tokio::test]
async fn enriches_through_the_hosting_apis() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "foo/foo",
            "stargazers_count": 77,
            "archived": false,
            "pushed_at": "2025-01-02T03:04:05Z",
            "updated_at": "2025-01-03T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/foo/foo/releases/latest"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/bar/bar"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/baz%2Fbaz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path_with_namespace": "baz/baz",
            "star_count": 8,
            "archived": false,
            "last_activity_at": "2025-02-01T10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/baz%2Fbaz/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tag_name": "v1.4", "released_at": "2025-01-20T09:00:00.000Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = fixture();
    let store = Store::open(dir.path()).unwrap();
    let mut catalog = store.load(&licenses()).unwrap();

    let timeout = Duration::from_secs(5);
    let source = HostedSource::new(
        Some(GitHubClient::new(server.uri(), Some("token".into()), timeout).unwrap()),
        Some(GitLabClient::new(server.uri(), Some("token".into()), timeout).unwrap()),
    );
    let mut enricher = Enricher::new(source, Duration::ZERO);
    let report = enricher.run(&store, &mut catalog).await.unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(read(dir.path(), "foo.yml").ends_with("stargazers_count: 77\nupdated_at: 2025-01-02\narchived: false\n"));
    assert!(read(dir.path(), "baz.yml").contains("stargazers_count: 8\nupdated_at: 2025-02-01\narchived: false\ncurrent_release:\n  tag: v1.4\n"));
}
