//! Service account key loading
//!
//! The key file must exist and parse before a client is built, so a bad
//! path never reaches the network.

use std::io::ErrorKind;
use std::path::Path;

use gcsu_core::{Error, Result};
use google_cloud_storage::client::google_cloud_auth::credentials::CredentialsFile;

/// Read and parse a service account key file
pub async fn load_credentials(path: &Path) -> Result<CredentialsFile> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(Error::CredentialFileInvalid(format!(
                "'{}' is not a regular file",
                path.display()
            )));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::CredentialFileMissing(path.to_path_buf()));
        }
        Err(e) => return Err(Error::CredentialFileInvalid(e.to_string())),
    }

    tracing::debug!(path = %path.display(), "loading service account key");

    CredentialsFile::new_from_file(path.to_string_lossy().into_owned())
        .await
        .map_err(|e| Error::CredentialFileInvalid(e.to_string()))
}
