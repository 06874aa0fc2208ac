//! Domain errors for the JupyterHub provider.

use std::fmt;

use jupyterhub_sdk::{Diagnostics, JupyterHubError};
use thiserror::Error;

use crate::config::ConfigAttribute;

/// A single configuration problem, scoped to one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The explicit value depends on something not evaluated yet.
    #[error("unknown value for {attribute}")]
    UnresolvedValue { attribute: ConfigAttribute },

    /// Neither a token nor this half of the username/password pair is set.
    #[error("missing {attribute} or token")]
    MissingCredential { attribute: ConfigAttribute },
}

impl ConfigError {
    #[must_use]
    pub fn attribute(&self) -> ConfigAttribute {
        match self {
            Self::UnresolvedValue { attribute } | Self::MissingCredential { attribute } => {
                *attribute
            }
        }
    }
}

/// Every configuration problem found in one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    pub fn push(&mut self, err: ConfigError) {
        self.0.push(err);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.0.iter()
    }

    /// Attributes with at least one error, in report order.
    #[must_use]
    pub fn attributes(&self) -> Vec<ConfigAttribute> {
        self.0.iter().map(ConfigError::attribute).collect()
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

impl<'a> IntoIterator for &'a ConfigErrors {
    type Item = &'a ConfigError;
    type IntoIter = std::slice::Iter<'a, ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Internal domain errors.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("invalid provider configuration: {0}")]
    InvalidConfig(ConfigErrors),

    #[error("unable to create JupyterHub API client: {0}")]
    ClientConstruction(String),

    #[error("unable to read JupyterHub user: {0}")]
    Query(String),

    #[error("invalid user name '{raw}': {reason}")]
    InvalidName { raw: String, reason: String },
}

impl DomainError {
    #[must_use]
    pub fn invalid_name(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigErrors> for DomainError {
    fn from(e: ConfigErrors) -> Self {
        Self::InvalidConfig(e)
    }
}

impl From<JupyterHubError> for DomainError {
    fn from(e: JupyterHubError) -> Self {
        Self::Query(e.to_string())
    }
}

fn config_error_detail(err: &ConfigError) -> String {
    let attr = err.attribute();
    match err {
        ConfigError::UnresolvedValue { .. } => format!(
            "The provider cannot create the JupyterHub API client because the {attr} value \
             is not known yet. Apply the source of the value first, set the value statically \
             in the configuration, or use the {} environment variable.",
            attr.env_var()
        ),
        ConfigError::MissingCredential { .. } => format!(
            "The provider cannot create the JupyterHub API client: {err} (one is needed). \
             Set the {attr} value in the configuration or use the {} environment variable. \
             Set the token value in the configuration or use the {} environment variable. \
             If either is already set, ensure the value is not empty.",
            attr.env_var(),
            ConfigAttribute::Token.env_var()
        ),
    }
}

fn config_error_summary(err: &ConfigError) -> String {
    let label = err.attribute().label();
    match err {
        ConfigError::UnresolvedValue { .. } => format!("Unknown JupyterHub API {label}"),
        ConfigError::MissingCredential { .. } => {
            format!("Missing JupyterHub API Token and {label}")
        }
    }
}

impl From<DomainError> for Diagnostics {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidConfig(errors) => {
                let mut diags = Diagnostics::new();
                for err in &errors {
                    diags.add_attribute_error(
                        err.attribute().name(),
                        config_error_summary(err),
                        config_error_detail(err),
                    );
                }
                diags
            }
            DomainError::ClientConstruction(msg) => Diagnostics::error(
                "Unable to Create JupyterHub API Client",
                format!(
                    "An unexpected error occurred when creating the JupyterHub API client. \
                     If the error is not clear, please contact the provider developers.\n\n\
                     JupyterHub Client Error: {msg}"
                ),
            ),
            DomainError::Query(msg) => Diagnostics::error("Unable to Read JupyterHub User", msg),
            err @ DomainError::InvalidName { .. } => {
                let mut diags = Diagnostics::new();
                diags.add_attribute_error("name", "Invalid JupyterHub Username", err.to_string());
                diags
            }
        }
    }
}
