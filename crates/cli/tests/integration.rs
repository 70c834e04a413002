//! Integration tests for the gcsu CLI
//!
//! These tests require a real Cloud Storage bucket and a service account
//! with the Storage Object Admin role on it.
//!
//! Run with:
//! ```bash
//! export TEST_GCS_BUCKET=my-test-bucket
//! export TEST_GCS_CREDENTIALS=/path/to/key.json
//! cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use gcsu_core::{ObjectRef, ObjectStore};
use gcsu_gcs::GcsClient;
use tempfile::TempDir;

/// Get bucket and key file from the environment
fn get_test_config() -> Option<(String, String)> {
    let bucket = std::env::var("TEST_GCS_BUCKET").ok()?;
    let credentials = std::env::var("TEST_GCS_CREDENTIALS").ok()?;
    Some((bucket, credentials))
}

/// Run gcsu against the test bucket
fn run_gcsu(args: &[&str], config_dir: &Path) -> Output {
    let (bucket, credentials) = get_test_config().expect("test config");
    Command::new(env!("CARGO_BIN_EXE_gcsu"))
        .args(args)
        .env("GCSU_CONFIG_DIR", config_dir)
        .env("GCSU_BUCKET", bucket)
        .env("GCSU_CREDENTIALS", credentials)
        .output()
        .expect("Failed to execute gcsu")
}

/// Unique object prefix so parallel runs don't collide
fn unique_prefix(test: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("gcsu-test/{test}-{nanos}/")
}

/// Deletes the listed objects when dropped, so a failed assertion
/// still leaves the bucket clean
struct Cleanup(Vec<String>);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let Some((bucket, credentials)) = get_test_config() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Runtime::new() else {
            return;
        };
        runtime.block_on(async {
            let Ok(client) = GcsClient::from_credentials_file(Path::new(&credentials)).await
            else {
                return;
            };
            for name in &self.0 {
                if let Ok(object) = ObjectRef::new(&bucket, name) {
                    // Already gone is fine
                    let _ = client.delete_object(&object).await;
                }
            }
        });
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_upload_list_download_rename() {
    if get_test_config().is_none() {
        eprintln!("Skipping: TEST_GCS_BUCKET/TEST_GCS_CREDENTIALS not set");
        return;
    }

    let work = TempDir::new().unwrap();
    let prefix = unique_prefix("roundtrip");
    let name = format!("{prefix}hello.txt");
    let renamed = format!("{prefix}renamed.txt");
    let _cleanup = Cleanup(vec![name.clone(), renamed.clone()]);

    let source = work.path().join("hello.txt");
    std::fs::write(&source, b"hello from gcsu").unwrap();
    let source = source.to_string_lossy().to_string();

    let output = run_gcsu(&["upload", &source, &name], work.path());
    assert!(output.status.success(), "upload failed: {output:?}");
    assert!(stdout(&output).contains("https://storage.googleapis.com/"));

    let output = run_gcsu(&["--json", "list", "--prefix", &prefix], work.path());
    assert!(output.status.success(), "list failed: {output:?}");
    let listed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listed["summary"]["total_objects"], 1);
    assert_eq!(listed["items"][0]["name"], name.as_str());

    let output = run_gcsu(&["rename", &name, &renamed], work.path());
    assert!(output.status.success(), "rename failed: {output:?}");

    let downloaded = work.path().join("downloaded.txt");
    let downloaded_str = downloaded.to_string_lossy().to_string();

    let output = run_gcsu(&["download", &name, &downloaded_str], work.path());
    assert_eq!(output.status.code(), Some(5), "old name must be gone");
    assert!(!downloaded.exists());

    let output = run_gcsu(&["download", &renamed, &downloaded_str], work.path());
    assert!(output.status.success(), "download failed: {output:?}");
    assert_eq!(std::fs::read(&downloaded).unwrap(), b"hello from gcsu");
}

#[test]
fn test_rename_missing_object() {
    if get_test_config().is_none() {
        eprintln!("Skipping: TEST_GCS_BUCKET/TEST_GCS_CREDENTIALS not set");
        return;
    }

    let work = TempDir::new().unwrap();
    let prefix = unique_prefix("missing");
    let output = run_gcsu(
        &["rename", &format!("{prefix}ghost"), &format!("{prefix}new")],
        work.path(),
    );

    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
