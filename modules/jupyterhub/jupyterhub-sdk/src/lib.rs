#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! JupyterHub Provider SDK
//!
//! This crate provides the public surface shared by the provider and its host:
//!
//! - [`JupyterHubClient`] - Client trait for the JupyterHub REST API
//! - [`HubUser`] - User model as returned by the API
//! - [`JupyterHubError`] - Client error types
//! - [`Provider`] / [`DataSource`] - Host-facing plugin traits
//! - [`ConfigValue`], [`Schema`], [`Diagnostics`] - Host contract value types
//!
//! ## Usage
//!
//! The orchestrator configures a provider and reads through its data sources:
//!
//! ```ignore
//! use jupyterhub_sdk::{ConfigValue, Provider, ReadRequest};
//!
//! let client = provider.configure(&raw_config).await?;
//! let mut users = provider.data_sources().remove(0);
//! users.configure(client);
//!
//! let request = ReadRequest::new().with_attribute("name", ConfigValue::known("alice"));
//! let state = users.read(&request).await?;
//! ```

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod schema;
pub mod value;

// Re-export main types at crate root
pub use api::JupyterHubClient;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::JupyterHubError;
pub use models::HubUser;
pub use plugin_api::{DataSource, Provider, ProviderMetadata, ReadRequest};
pub use schema::{Attribute, AttributeType, Schema};
pub use value::{ConfigValue, RawConfig};
