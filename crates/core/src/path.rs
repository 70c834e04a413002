//! Object references
//!
//! An [`ObjectRef`] names one object inside a bucket. Names are checked
//! against the storage naming rules before any request is made.

use crate::error::{Error, Result};

/// Host used for the conventional public object URL
pub const PUBLIC_HOST: &str = "https://storage.googleapis.com";

/// Maximum object name length in bytes (UTF-8)
pub const MAX_OBJECT_NAME_BYTES: usize = 1024;

/// A bucket plus an object name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Bucket name
    pub bucket: String,
    /// Object name
    pub name: String,
}

impl ObjectRef {
    /// Create a new ObjectRef, validating the object name
    pub fn new(bucket: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_object_name(&name)?;
        Ok(Self {
            bucket: bucket.into(),
            name,
        })
    }

    /// Conventional public URL for the object.
    ///
    /// Only reachable if the bucket or object grants public read access.
    pub fn public_url(&self) -> String {
        format!("{PUBLIC_HOST}/{}/{}", self.bucket, self.name)
    }

    /// Same bucket, different object name
    pub fn with_name(&self, name: impl Into<String>) -> Result<Self> {
        Self::new(self.bucket.clone(), name)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.name)
    }
}

/// Check an object name against the storage naming rules
pub fn validate_object_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidObjectName(
            "object name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_OBJECT_NAME_BYTES {
        return Err(Error::InvalidObjectName(format!(
            "object name is {} bytes, the limit is {MAX_OBJECT_NAME_BYTES}",
            name.len()
        )));
    }

    if name.contains(['\r', '\n']) {
        return Err(Error::InvalidObjectName(format!(
            "object name cannot contain carriage return or line feed: {name:?}"
        )));
    }

    if name == "." || name == ".." {
        return Err(Error::InvalidObjectName(format!(
            "object name cannot be '{name}'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let obj = ObjectRef::new("my-bucket", "reports/2024.pdf").unwrap();
        assert_eq!(
            obj.public_url(),
            "https://storage.googleapis.com/my-bucket/reports/2024.pdf"
        );
    }

    #[test]
    fn test_display() {
        let obj = ObjectRef::new("my-bucket", "a.txt").unwrap();
        assert_eq!(obj.to_string(), "gs://my-bucket/a.txt");
    }

    #[test]
    fn test_with_name_keeps_bucket() {
        let obj = ObjectRef::new("my-bucket", "old.txt").unwrap();
        let renamed = obj.with_name("new.txt").unwrap();
        assert_eq!(renamed.bucket, "my-bucket");
        assert_eq!(renamed.name, "new.txt");
    }

    #[test]
    fn test_invalid_names() {
        assert!(ObjectRef::new("b", "").is_err());
        assert!(ObjectRef::new("b", "..").is_err());
        assert!(ObjectRef::new("b", "line\nbreak").is_err());
        assert!(ObjectRef::new("b", "x".repeat(MAX_OBJECT_NAME_BYTES + 1)).is_err());
    }

    #[test]
    fn test_names_with_spaces_and_slashes_are_valid() {
        assert!(ObjectRef::new("b", "my folder/my file.txt").is_ok());
        assert!(ObjectRef::new("b", "x".repeat(MAX_OBJECT_NAME_BYTES)).is_ok());
    }
}
