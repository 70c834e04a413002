//! Cloud Storage client implementation
//!
//! Wraps google-cloud-storage and implements the ObjectStore trait from gcsu-core.

use std::path::Path;

use async_trait::async_trait;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::Error as HttpError;
use google_cloud_storage::http::objects::Object;
use google_cloud_storage::http::objects::copy::CopyObjectRequest;
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use gcsu_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectRef, ObjectStore, Result};

use crate::credentials::load_credentials;

/// Cloud Storage client wrapper
pub struct GcsClient {
    inner: Client,
}

impl GcsClient {
    /// Create an authenticated client from a service account key file.
    ///
    /// Fails with `CredentialFileMissing` when the path does not exist and
    /// `CredentialFileInvalid` when the key cannot be parsed or used.
    pub async fn from_credentials_file(path: &Path) -> Result<Self> {
        let credentials = load_credentials(path).await?;

        let config = ClientConfig::default()
            .with_credentials(credentials)
            .await
            .map_err(|e| Error::CredentialFileInvalid(e.to_string()))?;

        Ok(Self {
            inner: Client::new(config),
        })
    }
}

/// Translate an SDK error into a raw gcsu error.
///
/// The key is only exchanged for an access token on the first request, so a
/// revoked or disabled key surfaces here as a token source failure.
fn map_error(err: HttpError) -> Error {
    match err {
        HttpError::Response(resp) => match resp.code {
            404 => Error::NotFound(resp.message),
            403 => Error::Forbidden(resp.message),
            401 => Error::CredentialFileInvalid(resp.message),
            _ => Error::Remote(resp.to_string()),
        },
        HttpError::TokenSource(e) => Error::CredentialFileInvalid(e.to_string()),
        HttpError::HttpClient(e) => Error::Network(e.to_string()),
        other => Error::Remote(other.to_string()),
    }
}

fn object_info(object: Object) -> ObjectInfo {
    let mut info = ObjectInfo::new(object.name, object.size);
    info.updated = object
        .updated
        .and_then(|t| jiff::Timestamp::from_second(t.unix_timestamp()).ok());
    info.content_type = object.content_type;
    info
}

#[async_trait]
impl ObjectStore for GcsClient {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult> {
        tracing::debug!(bucket, prefix = ?options.prefix, "list_objects");

        let request = ListObjectsRequest {
            bucket: bucket.to_string(),
            prefix: options.prefix,
            page_token: options.page_token,
            max_results: options.max_results,
            ..Default::default()
        };

        let response = self.inner.list_objects(&request).await.map_err(map_error)?;

        Ok(ListResult {
            items: response
                .items
                .unwrap_or_default()
                .into_iter()
                .map(object_info)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn head_object(&self, object: &ObjectRef) -> Result<Option<ObjectInfo>> {
        tracing::debug!(bucket = %object.bucket, object = %object.name, "head_object");

        let request = GetObjectRequest {
            bucket: object.bucket.clone(),
            object: object.name.clone(),
            ..Default::default()
        };

        match self.inner.get_object(&request).await {
            Ok(found) => Ok(Some(object_info(found))),
            Err(HttpError::Response(resp)) if resp.code == 404 => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    async fn put_object(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        tracing::debug!(
            bucket = %object.bucket,
            object = %object.name,
            size = data.len(),
            "put_object"
        );

        let request = UploadObjectRequest {
            bucket: object.bucket.clone(),
            ..Default::default()
        };

        let mut media = Media::new(object.name.clone());
        if let Some(ct) = content_type {
            media.content_type = ct.into();
        }

        let uploaded = self
            .inner
            .upload_object(&request, data, &UploadType::Simple(media))
            .await
            .map_err(map_error)?;

        Ok(object_info(uploaded))
    }

    async fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>> {
        tracing::debug!(bucket = %object.bucket, object = %object.name, "get_object");

        let request = GetObjectRequest {
            bucket: object.bucket.clone(),
            object: object.name.clone(),
            ..Default::default()
        };

        self.inner
            .download_object(&request, &Range::default())
            .await
            .map_err(map_error)
    }

    async fn copy_object(&self, src: &ObjectRef, dst: &ObjectRef) -> Result<ObjectInfo> {
        tracing::debug!(source = %src, target = %dst, "copy_object");

        let request = CopyObjectRequest {
            source_bucket: src.bucket.clone(),
            source_object: src.name.clone(),
            destination_bucket: dst.bucket.clone(),
            destination_object: dst.name.clone(),
            ..Default::default()
        };

        let copied = self.inner.copy_object(&request).await.map_err(map_error)?;
        Ok(object_info(copied))
    }

    async fn delete_object(&self, object: &ObjectRef) -> Result<()> {
        tracing::debug!(bucket = %object.bucket, object = %object.name, "delete_object");

        let request = DeleteObjectRequest {
            bucket: object.bucket.clone(),
            object: object.name.clone(),
            ..Default::default()
        };

        self.inner.delete_object(&request).await.map_err(map_error)
    }
}
