//! Error types for gcsu-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Storage adapters report raw remote conditions (`NotFound`, `Forbidden`, ...);
//! command handlers put them in context with [`Error::in_context`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gcsu-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of access a command needs on a bucket.
///
/// Used to pick the IAM role hint shown when the remote side denies a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Listing and downloading objects
    Read,
    /// Creating or overwriting objects
    Write,
    /// Copying and deleting objects (rename)
    Move,
}

impl Access {
    /// Roles that grant this access
    pub const fn roles(self) -> &'static str {
        match self {
            Access::Read => "'Storage Object Viewer' or 'Storage Object Admin'",
            Access::Write => "'Storage Object Admin' or 'Storage Object Creator'",
            Access::Move => "'Storage Object Admin'",
        }
    }
}

/// Error types for gcsu operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket and/or credential file were never configured
    #[error(
        "Configuration incomplete: {missing} not set. Use `gcsu config set`, the --bucket/--credentials flags, or the GCSU_BUCKET/GCSU_CREDENTIALS environment variables."
    )]
    ConfigurationIncomplete { missing: String },

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service account key file does not exist
    #[error("Service account key file not found at '{}'", .0.display())]
    CredentialFileMissing(PathBuf),

    /// Key file could not be parsed or was rejected
    #[error("Failed to create storage client. Check your key file. Details: {0}")]
    CredentialFileInvalid(String),

    /// Local upload source does not exist or is not a regular file
    #[error("Source file not found at '{}'", .0.display())]
    SourceFileMissing(PathBuf),

    /// Object to download does not exist
    #[error("Object '{object}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, object: String },

    /// Object to rename does not exist
    #[error("Source object '{object}' not found in bucket '{bucket}'")]
    SourceObjectNotFound { bucket: String, object: String },

    /// Bucket does not exist
    #[error("Bucket '{0}' not found")]
    BucketNotFound(String),

    /// The credential lacks the role needed for the operation
    #[error(
        "Permission denied. Ensure your service account has the {roles} role on the bucket '{bucket}'. Details: {detail}"
    )]
    PermissionDenied {
        bucket: String,
        roles: &'static str,
        detail: String,
    },

    /// Rename copied the object but could not delete the original
    #[error(
        "Copied '{source_name}' to '{target_name}' but failed to delete the original; both objects now exist. Details: {detail}"
    )]
    RenameIncomplete {
        source_name: String,
        target_name: String,
        detail: String,
    },

    /// Object name violates storage naming rules
    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),

    /// Remote resource not found (raw adapter signal)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote request forbidden (raw adapter signal)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Any other remote failure, message kept verbatim
    #[error("An unexpected error occurred: {0}")]
    Remote(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::ConfigurationIncomplete { .. }
            | Error::Config(_)
            | Error::InvalidObjectName(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => 2, // UsageError
            Error::Network(_) => 3, // NetworkError
            Error::CredentialFileMissing(_)
            | Error::CredentialFileInvalid(_)
            | Error::PermissionDenied { .. }
            | Error::Forbidden(_) => 4, // AuthError
            Error::SourceFileMissing(_)
            | Error::ObjectNotFound { .. }
            | Error::SourceObjectNotFound { .. }
            | Error::BucketNotFound(_)
            | Error::NotFound(_) => 5, // NotFound
            Error::RenameIncomplete { .. } => 6, // PartialFailure
            _ => 1,                              // GeneralError
        }
    }

    /// Attach bucket and access context to a raw adapter error.
    ///
    /// A remote 404 on a bucket-scoped request means the bucket is missing;
    /// a 403 becomes a permission error carrying the role hint for `access`.
    /// Everything else passes through unchanged.
    pub fn in_context(self, access: Access, bucket: &str) -> Self {
        match self {
            Error::NotFound(_) => Error::BucketNotFound(bucket.to_string()),
            Error::Forbidden(detail) => Error::PermissionDenied {
                bucket: bucket.to_string(),
                roles: access.roles(),
                detail,
            },
            other => other,
        }
    }
}
