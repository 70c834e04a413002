//! gcsu-gcs: Cloud Storage SDK adapter for the gcsu CLI
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the google-cloud-storage crate. It is the only crate that directly
//! depends on the SDK.

pub mod client;
pub mod credentials;

pub use client::GcsClient;
pub use credentials::load_credentials;
