//! Test doubles for command handlers

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gcsu_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectRef, ObjectStore, Result};

use crate::output::{Formatter, OutputConfig};

pub const BUCKET: &str = "test-bucket";

/// Formatter that prints nothing but errors
pub fn quiet() -> Formatter {
    Formatter::new(OutputConfig {
        quiet: true,
        no_color: true,
        ..Default::default()
    })
}

pub fn object(name: &str) -> ObjectRef {
    ObjectRef::new(BUCKET, name).unwrap()
}

/// In-memory single-bucket store.
///
/// Requests for any other bucket behave like a missing bucket.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    page_size: Option<usize>,
    pub fail_delete: bool,
    pub list_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    pub copy_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return list results in pages of `size` names
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn with_object(self, name: &str, data: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(name.to_string(), data.to_vec());
        self
    }

    pub fn content(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    fn check_bucket(bucket: &str) -> Result<()> {
        if bucket == BUCKET {
            Ok(())
        } else {
            Err(Error::NotFound(format!("bucket {bucket}")))
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::check_bucket(bucket)?;

        let objects = self.objects.lock().unwrap();
        let prefix = options.prefix.unwrap_or_default();
        let start: usize = options
            .page_token
            .as_deref()
            .map(|t| t.parse().unwrap())
            .unwrap_or(0);

        let matching: Vec<ObjectInfo> = objects
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(name, data)| ObjectInfo::new(name.clone(), data.len() as i64))
            .collect();

        let end = match self.page_size {
            Some(size) => (start + size).min(matching.len()),
            None => matching.len(),
        };
        let next_page_token = (end < matching.len()).then(|| end.to_string());

        Ok(ListResult {
            items: matching[start..end].to_vec(),
            next_page_token,
        })
    }

    async fn head_object(&self, object: &ObjectRef) -> Result<Option<ObjectInfo>> {
        if Self::check_bucket(&object.bucket).is_err() {
            return Ok(None);
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(&object.name)
            .map(|data| ObjectInfo::new(object.name.clone(), data.len() as i64)))
    }

    async fn put_object(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        Self::check_bucket(&object.bucket)?;

        let mut info = ObjectInfo::new(object.name.clone(), data.len() as i64);
        info.content_type = content_type;
        self.objects
            .lock()
            .unwrap()
            .insert(object.name.clone(), data);
        Ok(info)
    }

    async fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>> {
        Self::check_bucket(&object.bucket)?;
        self.content(&object.name)
            .ok_or_else(|| Error::NotFound(object.to_string()))
    }

    async fn copy_object(&self, src: &ObjectRef, dst: &ObjectRef) -> Result<ObjectInfo> {
        self.copy_calls.fetch_add(1, Ordering::SeqCst);
        Self::check_bucket(&src.bucket)?;

        let mut objects = self.objects.lock().unwrap();
        let data = objects
            .get(&src.name)
            .cloned()
            .ok_or_else(|| Error::NotFound(src.to_string()))?;
        let info = ObjectInfo::new(dst.name.clone(), data.len() as i64);
        objects.insert(dst.name.clone(), data);
        Ok(info)
    }

    async fn delete_object(&self, object: &ObjectRef) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(Error::Forbidden("storage.objects.delete denied".to_string()));
        }
        Self::check_bucket(&object.bucket)?;

        self.objects
            .lock()
            .unwrap()
            .remove(&object.name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(object.to_string()))
    }
}

// Any call without a matching expectation panics and fails the test.
mockall::mock! {
    pub Store {}

    #[async_trait]
    impl ObjectStore for Store {
        async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;
        async fn head_object(&self, object: &ObjectRef) -> Result<Option<ObjectInfo>>;
        async fn put_object(
            &self,
            object: &ObjectRef,
            data: Vec<u8>,
            content_type: Option<String>,
        ) -> Result<ObjectInfo>;
        async fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>>;
        async fn copy_object(&self, src: &ObjectRef, dst: &ObjectRef) -> Result<ObjectInfo>;
        async fn delete_object(&self, object: &ObjectRef) -> Result<()>;
    }
}
