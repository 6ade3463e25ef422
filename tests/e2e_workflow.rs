//! End-to-end tests for the sync pipeline: cache bootstrap, generation,
//! patching and write-back.

use status_sync::config::{load_from_str, SyncConfig};
use status_sync::marker::MarkerError;
use status_sync::registry::{Fetcher, RegistryError};
use status_sync::sync::{run, RegionOutcome, SyncError, SyncOptions};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const REGISTRY: &str = "Value,Description,Reference\n\
                        100,Continue,[RFC7231][Section 6.2.1]\n\
                        103,Early Hints,[RFC8297]\n\
                        200,OK,[RFC7231][Section 6.3.1]\n";

const TARGET: &str = r#"namespace status {
enum Code {
  // @http-status-codes-begin
  // @http-status-codes-end
};
const char* phrase(int code) {
  switch (code) {
    // @http-status-phrases-begin
    // @http-status-phrases-end
  }
  return "";
}
}
"#;

struct StubFetcher {
    body: String,
    calls: Cell<usize>,
}

impl StubFetcher {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: Cell::new(0),
        }
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, RegistryError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.body.clone().into_bytes())
    }
}

fn setup(registry: Option<&str>, target: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    if let Some(registry) = registry {
        write(dir.path(), "references/http-status-codes.csv", registry);
    }
    if let Some(target) = target {
        write(dir.path(), "include/hypp/status.hpp", target);
    }
    dir
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn options(dir: &TempDir) -> SyncOptions {
    SyncOptions {
        root: dir.path().to_path_buf(),
        ..Default::default()
    }
}

fn target_text(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("include/hypp/status.hpp")).unwrap()
}

#[test]
fn test_end_to_end_three_codes() {
    let dir = setup(Some(REGISTRY), Some(TARGET));
    let fetcher = StubFetcher::new("");

    let report = run(&SyncConfig::default(), &options(&dir), &fetcher).unwrap();

    assert_eq!(fetcher.calls.get(), 0);
    assert!(report.written);

    let expected = r#"namespace status {
enum Code {
  // @http-status-codes-begin
  k100_Continue = 100,     // [RFC7231] [Section 6.2.1]
  k103_Early_Hints = 103,  // [RFC8297]
  k200_OK = 200,           // [RFC7231] [Section 6.3.1]
  // @http-status-codes-end
};
const char* phrase(int code) {
  switch (code) {
    // @http-status-phrases-begin
    case 100: return "Continue";
    case 103: return "Early Hints";
    case 200: return "OK";
    // @http-status-phrases-end
  }
  return "";
}
}
"#;
    assert_eq!(target_text(&dir), expected);
}

#[test]
fn test_placeholder_rows_widen_alignment() {
    let registry = "Value,Description,Reference\n\
                    200,OK,[RFC9110]\n\
                    1000-1999,Unassigned,\n\
                    404,Not Found,[RFC9110]\n";
    let dir = setup(Some(registry), Some(TARGET));

    let _ = run(&SyncConfig::default(), &options(&dir), &StubFetcher::new("")).unwrap();

    let text = target_text(&dir);
    // "k1000-1999_Unassigned = 1000-1999," is 34 characters wide.
    assert!(text.contains(&format!("  {:<34}  // [RFC9110]\n", "k200_OK = 200,")));
    assert!(text.contains(&format!("  {:<34}  // [RFC9110]\n", "k404_Not_Found = 404,")));
    assert!(!text.contains("Unassigned"));
}

#[test]
fn test_fetches_on_cache_miss() {
    let dir = setup(None, Some(TARGET));
    let fetcher = StubFetcher::new(REGISTRY);

    let report = run(&SyncConfig::default(), &options(&dir), &fetcher).unwrap();

    assert!(report.fetched);
    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("references/http-status-codes.csv")).unwrap(),
        REGISTRY
    );
    assert!(target_text(&dir).contains("case 103: return \"Early Hints\";"));
}

#[test]
fn test_fetches_when_cache_empty() {
    let dir = setup(Some(""), Some(TARGET));
    let fetcher = StubFetcher::new(REGISTRY);

    let report = run(&SyncConfig::default(), &options(&dir), &fetcher).unwrap();
    assert!(report.fetched);
    assert_eq!(fetcher.calls.get(), 1);
}

#[test]
fn test_missing_target_is_fatal() {
    let dir = setup(Some(REGISTRY), None);

    let result = run(&SyncConfig::default(), &options(&dir), &StubFetcher::new(""));
    assert!(matches!(result, Err(SyncError::Io { .. })));
}

#[test]
fn test_malformed_row_is_fatal_and_target_untouched() {
    let dir = setup(Some("Value,Description,Reference\n200,OK\n"), Some(TARGET));

    let result = run(&SyncConfig::default(), &options(&dir), &StubFetcher::new(""));

    assert!(matches!(
        result,
        Err(SyncError::Registry(RegistryError::MalformedRow { .. }))
    ));
    assert_eq!(target_text(&dir), TARGET);
}

#[test]
fn test_missing_regions_leave_file_unchanged() {
    let source = "int main() { return 0; }\n";
    let dir = setup(Some(REGISTRY), Some(source));

    let report = run(&SyncConfig::default(), &options(&dir), &StubFetcher::new("")).unwrap();

    assert!(!report.written);
    assert_eq!(report.missing_regions().count(), 2);
    assert_eq!(target_text(&dir), source);
}

#[test]
fn test_strict_mode_rejects_typo_region() {
    let dir = setup(Some(REGISTRY), Some(TARGET));
    let config = load_from_str(
        r#"
[target]
phrases_region = "http-status-phrase"
strict = true
"#,
    )
    .unwrap();

    let result = run(&config, &options(&dir), &StubFetcher::new(""));

    assert!(matches!(
        result,
        Err(SyncError::Marker(MarkerError::RegionNotFound { ref id })) if id == "http-status-phrase"
    ));
    assert_eq!(target_text(&dir), TARGET);
}

#[test]
fn test_dry_run_does_not_write() {
    let dir = setup(Some(REGISTRY), Some(TARGET));
    let options = SyncOptions {
        dry_run: true,
        ..options(&dir)
    };

    let report = run(&SyncConfig::default(), &options, &StubFetcher::new("")).unwrap();

    assert!(report.changed());
    assert!(!report.written);
    assert_eq!(target_text(&dir), TARGET);
    assert_eq!(
        report.regions.iter().map(|r| r.outcome).collect::<Vec<_>>(),
        vec![RegionOutcome::Patched, RegionOutcome::Patched]
    );
}

#[test]
fn test_custom_paths_from_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/codes.csv", REGISTRY);
    write(
        dir.path(),
        "src/status.rs",
        "match code {\n        // @phrases-begin\n        // @phrases-end\n}\n",
    );
    let config = load_from_str(
        r#"
[registry]
cache = "data/codes.csv"

[target]
file = "src/status.rs"
codes_region = "codes"
phrases_region = "phrases"
"#,
    )
    .unwrap();

    let report = run(&config, &options(&dir), &StubFetcher::new("")).unwrap();

    assert_eq!(report.regions[0].outcome, RegionOutcome::Missing);
    assert_eq!(report.regions[1].outcome, RegionOutcome::Patched);
    let text = fs::read_to_string(dir.path().join("src/status.rs")).unwrap();
    assert!(text.contains("        case 200: return \"OK\";\n        // @phrases-end"));
}
