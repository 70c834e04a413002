//! upload command - Upload a local file to the bucket
//!
//! The destination object is created or overwritten unconditionally.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use gcsu_core::{Access, Error, ObjectRef, ObjectStore, Result, Settings};
use serde::Serialize;

use crate::output::Formatter;

/// Upload a file
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local path of the file to upload
    pub source_file: PathBuf,

    /// Name to give the uploaded object in the bucket
    pub destination_name: String,

    /// Content type for the object (guessed from the file extension if omitted)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadOutput {
    status: &'static str,
    source: String,
    target: String,
    public_url: String,
    size_bytes: i64,
    size_human: String,
}

/// Execute the upload command
pub async fn execute(args: UploadArgs, settings: &Settings, formatter: &Formatter) -> Result<()> {
    let target = ObjectRef::new(&settings.bucket, &args.destination_name)?;

    // The source must exist before we authenticate
    ensure_source_file(&args.source_file).await?;

    let client = super::connect(settings).await?;
    let output = upload_file(
        &client,
        &args.source_file,
        &target,
        args.content_type,
        formatter,
    )
    .await?;

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.success("File uploaded.");
        formatter.println(&format!("Public URL: {}", output.public_url));
    }
    Ok(())
}

/// Fail with `SourceFileMissing` unless `path` is a regular file
async fn ensure_source_file(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(Error::SourceFileMissing(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(Error::SourceFileMissing(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read `source` and store it as `target`.
///
/// Callers check the source with `ensure_source_file` before connecting.
pub(crate) async fn upload_file(
    store: &dyn ObjectStore,
    source: &Path,
    target: &ObjectRef,
    content_type: Option<String>,
    formatter: &Formatter,
) -> Result<UploadOutput> {
    let data = tokio::fs::read(source).await?;
    let content_type =
        content_type.or_else(|| mime_guess::from_path(source).first().map(|m| m.to_string()));

    formatter.step(&format!(
        "Uploading '{}' to bucket '{}' as '{}'...",
        source.display(),
        target.bucket,
        target.name
    ));

    let info = store
        .put_object(target, data, content_type)
        .await
        .map_err(|e| e.in_context(Access::Write, &target.bucket))?;

    tracing::info!(object = %target, size = info.size_bytes, "uploaded");

    Ok(UploadOutput {
        status: "success",
        source: source.display().to_string(),
        target: target.to_string(),
        public_url: target.public_url(),
        size_bytes: info.size_bytes,
        size_human: info.size_human,
    })
}
