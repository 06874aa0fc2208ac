//! Configuration resolution.
//!
//! Merges explicit values, environment variables and defaults into an
//! [`EffectiveConfig`], then builds a client handle from it.

use std::sync::Arc;

use jupyterhub_sdk::{ConfigValue, JupyterHubClient, JupyterHubError};
use secrecy::SecretString;
use tracing::{debug, info};

use super::error::{ConfigError, ConfigErrors, DomainError};
use crate::config::{ConfigAttribute, EffectiveConfig, EnvLookup, ProviderConfig};

/// Builds client handles from resolved configuration.
pub trait ClientFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce a usable client
    /// (malformed host, unsupported protocol, ...).
    fn create_client(
        &self,
        config: &EffectiveConfig,
    ) -> Result<Arc<dyn JupyterHubClient>, JupyterHubError>;
}

/// Merge one attribute. Returns `None` for unknown values.
fn merge_attribute(
    attr: ConfigAttribute,
    explicit: &ConfigValue<String>,
    env: &dyn EnvLookup,
) -> Option<String> {
    match explicit {
        ConfigValue::Unknown => None,
        ConfigValue::Known(value) => Some(value.clone()),
        ConfigValue::Null => Some(
            env.get(attr.env_var())
                .filter(|v| !v.is_empty())
                .or_else(|| attr.default_value().map(str::to_owned))
                .unwrap_or_default(),
        ),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolve the effective configuration.
///
/// Explicit `Unknown` values are reported without consulting the
/// environment for them, and credential checks that involve an unknown
/// value are skipped. All problems are collected before failing.
///
/// # Errors
///
/// Returns every [`ConfigError`] found.
pub fn resolve(
    explicit: &ProviderConfig,
    env: &dyn EnvLookup,
) -> Result<EffectiveConfig, ConfigErrors> {
    let mut errors = ConfigErrors::default();

    let mut merged = ConfigAttribute::ALL.map(|attr| {
        let value = merge_attribute(attr, explicit.get(attr), env);
        if value.is_none() {
            errors.push(ConfigError::UnresolvedValue { attribute: attr });
        }
        value
    });
    let [protocol, host, prefix, token, username, password] = &mut merged;

    for (secret, attribute) in [
        (&*username, ConfigAttribute::Username),
        (&*password, ConfigAttribute::Password),
    ] {
        if token.as_deref() == Some("") && secret.as_deref() == Some("") {
            errors.push(ConfigError::MissingCredential { attribute });
        }
    }

    if !errors.is_empty() {
        debug!(errors = %errors, "JupyterHub provider configuration rejected");
        return Err(errors);
    }

    Ok(EffectiveConfig {
        protocol: protocol.take().unwrap_or_default(),
        host: host.take().unwrap_or_default(),
        prefix: prefix.take().unwrap_or_default(),
        token: non_empty(token.take()).map(SecretString::from),
        username: non_empty(username.take()),
        password: non_empty(password.take()).map(SecretString::from),
    })
}

/// Resolve the configuration and build a client handle.
///
/// # Errors
///
/// - `InvalidConfig` with every validation problem
/// - `ClientConstruction` if the factory rejects the resolved configuration
#[tracing::instrument(skip_all)]
pub fn configure(
    explicit: &ProviderConfig,
    env: &dyn EnvLookup,
    factory: &dyn ClientFactory,
) -> Result<Arc<dyn JupyterHubClient>, DomainError> {
    let config = resolve(explicit, env)?;

    let uri = config.endpoint_uri();
    debug!(jupyterhub_uri = %uri, "Creating JupyterHub client");

    let client = factory.create_client(&config).map_err(|e| {
        tracing::error!(jupyterhub_uri = %uri, error = %e, "JupyterHub client construction failed");
        DomainError::ClientConstruction(e.to_string())
    })?;

    info!(jupyterhub_uri = %uri, success = true, "Configured JupyterHub client");
    Ok(client)
}
