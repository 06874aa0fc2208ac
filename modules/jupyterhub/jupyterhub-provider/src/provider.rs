//! Host adapter for the provider itself.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jupyterhub_sdk::{
    Attribute, AttributeType, DataSource, Diagnostics, JupyterHubClient, Provider,
    ProviderMetadata, RawConfig, Schema,
};
use tracing::info;

use crate::config::{ConfigAttribute, EnvLookup, ProcessEnv, ProviderConfig};
use crate::data_source::UserDataSource;
use crate::domain::{ClientFactory, resolver};
use crate::infra::HttpClientFactory;

/// Provider type name; every data source name starts with it.
pub const PROVIDER_TYPE_NAME: &str = "jupyterhub";

/// The JupyterHub provider.
///
/// `version` is the release version, `dev` for local builds and `test`
/// under acceptance testing.
pub struct JupyterHubProvider {
    version: String,
    env: Arc<dyn EnvLookup>,
    factory: Arc<dyn ClientFactory>,
}

impl fmt::Debug for JupyterHubProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JupyterHubProvider")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl JupyterHubProvider {
    /// Provider reading the process environment and talking HTTP.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            env: Arc::new(ProcessEnv),
            factory: Arc::new(HttpClientFactory),
        }
    }

    /// Replace the environment source.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvLookup + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the client factory.
    #[must_use]
    pub fn with_client_factory(mut self, factory: impl ClientFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }
}

fn attribute_description(attr: ConfigAttribute) -> String {
    let env = attr.env_var();
    match attr {
        ConfigAttribute::Host => format!(
            "Hostname for JupyterHub API. Default is 'localhost:8000'. \
             May also be provided via {env} environment variable."
        ),
        ConfigAttribute::Protocol => format!(
            "Protocol for JupyterHub API, 'http' or 'https'. Default is 'http'. \
             May also be provided via {env} environment variable."
        ),
        ConfigAttribute::Prefix => format!(
            "Prefix for JupyterHub API. Default is '/'. \
             May also be provided via {env} environment variable."
        ),
        ConfigAttribute::Token => format!(
            "API Token for JupyterHub API. Optional if username and password are set. \
             May also be provided via {env} environment variable."
        ),
        ConfigAttribute::Username => format!(
            "Username for JupyterHub API. Optional if token is set. \
             May also be provided via {env} environment variable."
        ),
        ConfigAttribute::Password => format!(
            "Password for JupyterHub API. Optional if token is set. \
             May also be provided via {env} environment variable."
        ),
    }
}

#[async_trait]
impl Provider for JupyterHubProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_owned(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        ConfigAttribute::ALL
            .into_iter()
            .fold(Schema::new("Interact with JupyterHub."), |schema, attr| {
                let attribute =
                    Attribute::optional(AttributeType::String, attribute_description(attr));
                let attribute = if attr.is_sensitive() {
                    attribute.sensitive()
                } else {
                    attribute
                };
                schema.with_attribute(attr.name(), attribute)
            })
    }

    async fn configure(&self, config: &RawConfig) -> Result<Arc<dyn JupyterHubClient>, Diagnostics> {
        info!(version = %self.version, "Configuring JupyterHub provider");
        let explicit = ProviderConfig::from_raw(config);
        resolver::configure(&explicit, self.env.as_ref(), self.factory.as_ref())
            .map_err(Diagnostics::from)
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        vec![Box::new(UserDataSource::new())]
    }
}
