//! rename command - Rename an object within the bucket
//!
//! Cloud Storage has no rename primitive, so this copies the object under the
//! new name and then deletes the original. The two steps are not atomic: if
//! the delete fails, both names exist and `RenameIncomplete` is returned.
//! Nothing is rolled back.

use clap::Args;
use gcsu_core::{Access, Error, ObjectRef, ObjectStore, Result, Settings};
use serde::Serialize;

use crate::output::Formatter;

/// Rename an object
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Current name of the object in the bucket
    pub source_name: String,

    /// New name for the object
    pub new_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RenameOutput {
    status: &'static str,
    source: String,
    target: String,
}

/// Execute the rename command
pub async fn execute(args: RenameArgs, settings: &Settings, formatter: &Formatter) -> Result<()> {
    let source = ObjectRef::new(&settings.bucket, &args.source_name)?;
    let target = source.with_name(&args.new_name)?;
    let client = super::connect(settings).await?;

    let output = rename_object(&client, &source, &target, formatter).await?;

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        formatter.success(&format!("File renamed to '{}'.", target.name));
    }
    Ok(())
}

pub(crate) async fn rename_object(
    store: &dyn ObjectStore,
    source: &ObjectRef,
    target: &ObjectRef,
    formatter: &Formatter,
) -> Result<RenameOutput> {
    // Copying onto itself and then deleting would destroy the object
    if source == target {
        return Err(Error::InvalidObjectName(format!(
            "new name '{}' is the same as the current name",
            target.name
        )));
    }

    let bucket = source.bucket.as_str();

    let exists = store
        .head_object(source)
        .await
        .map_err(|e| e.in_context(Access::Move, bucket))?;

    if exists.is_none() {
        return Err(Error::SourceObjectNotFound {
            bucket: bucket.to_string(),
            object: source.name.clone(),
        });
    }

    formatter.step(&format!(
        "Renaming '{}' to '{}' in bucket '{bucket}'...",
        source.name, target.name
    ));

    store
        .copy_object(source, target)
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => Error::SourceObjectNotFound {
                bucket: bucket.to_string(),
                object: source.name.clone(),
            },
            other => other.in_context(Access::Move, bucket),
        })?;

    if let Err(e) = store.delete_object(source).await {
        let e = e.in_context(Access::Move, bucket);
        tracing::warn!(source = %source, target = %target, error = %e, "copied but original not deleted");
        return Err(Error::RenameIncomplete {
            source_name: source.to_string(),
            target_name: target.to_string(),
            detail: e.to_string(),
        });
    }

    tracing::info!(source = %source, target = %target, "renamed");

    Ok(RenameOutput {
        status: "success",
        source: source.to_string(),
        target: target.to_string(),
    })
}
