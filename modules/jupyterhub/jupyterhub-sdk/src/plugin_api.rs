//! Plugin API traits implemented by the provider.
//!
//! The orchestrator drives a provider in a fixed order: `metadata()`,
//! `schema()`, `configure()` and then one `read()` per data source
//! instance in the practitioner's configuration.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::api::JupyterHubClient;
use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::{ConfigValue, RawConfig};

/// Provider identity reported to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Type name used as the prefix of every data source name.
    pub type_name: String,
    pub version: String,
}

/// Configuration of a single data source read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadRequest {
    pub config: RawConfig,
}

impl ReadRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: ConfigValue<String>) -> Self {
        self.config.insert(name.into(), value);
        self
    }

    /// Value of `name`; attributes the host did not send are `Null`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> ConfigValue<String> {
        self.config.get(name).cloned().unwrap_or_default()
    }
}

/// Provider-level plugin API.
#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;

    fn schema(&self) -> Schema;

    /// Validate the practitioner's configuration and build the client
    /// handle shared by all data sources.
    ///
    /// # Errors
    ///
    /// Returns every configuration problem found, each scoped to its
    /// attribute where possible.
    async fn configure(&self, config: &RawConfig) -> Result<Arc<dyn JupyterHubClient>, Diagnostics>;

    /// Fresh, unconfigured instances of every data source this provider offers.
    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;
}

/// Read-only data source API.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name, e.g. `jupyterhub_user`.
    fn type_name(&self) -> String;

    fn schema(&self) -> Schema;

    /// Attach the client handle produced by [`Provider::configure`].
    fn configure(&mut self, client: Arc<dyn JupyterHubClient>);

    /// Read the entity described by `request` and return its state object.
    ///
    /// # Errors
    ///
    /// Returns diagnostics if the request is incomplete, the data source was
    /// not configured, or the lookup failed.
    async fn read(&self, request: &ReadRequest) -> Result<serde_json::Value, Diagnostics>;
}
