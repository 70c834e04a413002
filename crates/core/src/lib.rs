//! gcsu-core: Core library for the gcsu Cloud Storage CLI
//!
//! This crate provides the core functionality for the gcsu CLI, including:
//! - Configuration management and settings resolution
//! - The error taxonomy shared by all commands
//! - Object references and name validation
//! - ObjectStore trait for bucket operations
//!
//! This crate is independent of the Cloud Storage SDK, so commands can be
//! tested against in-memory or mocked stores.

pub mod config;
pub mod error;
pub mod path;
pub mod traits;

pub use config::{Config, ConfigManager, Overrides, Settings};
pub use error::{Access, Error, Result};
pub use path::{ObjectRef, validate_object_name};
pub use traits::{ListOptions, ListResult, ObjectInfo, ObjectStore};
