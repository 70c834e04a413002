//! download command - Download an object to a local file
//!
//! The object's existence is checked first; the local file is only written
//! once the full content has been fetched.

use std::path::{Path, PathBuf};

use clap::Args;
use gcsu_core::{Access, Error, ObjectRef, ObjectStore, Result, Settings};
use serde::Serialize;

use crate::output::Formatter;

/// Download an object
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Name of the object in the bucket
    pub source_name: String,

    /// Local path to save the downloaded file
    pub destination_file: PathBuf,
}

#[derive(Debug, Serialize)]
pub(crate) struct DownloadOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: usize,
}

/// Execute the download command
pub async fn execute(
    args: DownloadArgs,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()> {
    let source = ObjectRef::new(&settings.bucket, &args.source_name)?;
    let client = super::connect(settings).await?;

    let output = download_object(&client, &source, &args.destination_file, formatter).await?;

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.success(&format!("File downloaded to '{}'.", output.target));
    }
    Ok(())
}

pub(crate) async fn download_object(
    store: &dyn ObjectStore,
    source: &ObjectRef,
    destination: &Path,
    formatter: &Formatter,
) -> Result<DownloadOutput> {
    let exists = store
        .head_object(source)
        .await
        .map_err(|e| e.in_context(Access::Read, &source.bucket))?;

    if exists.is_none() {
        return Err(Error::ObjectNotFound {
            bucket: source.bucket.clone(),
            object: source.name.clone(),
        });
    }

    formatter.step(&format!(
        "Downloading '{}' from bucket '{}' to '{}'...",
        source.name,
        source.bucket,
        destination.display()
    ));

    // The bucket answered the existence check, so a 404 now means the object went away
    let data = store.get_object(source).await.map_err(|e| match e {
        Error::NotFound(_) => Error::ObjectNotFound {
            bucket: source.bucket.clone(),
            object: source.name.clone(),
        },
        other => other.in_context(Access::Read, &source.bucket),
    })?;

    tokio::fs::write(destination, &data).await?;
    tracing::info!(object = %source, path = %destination.display(), size = data.len(), "downloaded");

    Ok(DownloadOutput {
        status: "success",
        source: source.to_string(),
        target: destination.display().to_string(),
        size_bytes: data.len(),
    })
}
