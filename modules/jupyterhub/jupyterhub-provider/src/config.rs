//! Configuration for the JupyterHub provider.
//!
//! Three sources feed the effective configuration, highest precedence first:
//! the practitioner's explicit values ([`ProviderConfig`]), `JUPYTERHUB_*`
//! environment variables (through an injected [`EnvLookup`]) and built-in
//! defaults. Merging and validation live in [`crate::domain::resolver`].

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use jupyterhub_sdk::{ConfigValue, RawConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Prefix of every environment variable the provider reads.
pub const ENV_PREFIX: &str = "JUPYTERHUB_";

pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_HOST: &str = "localhost:8000";
pub const DEFAULT_PREFIX: &str = "/";

/// Provider configuration attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigAttribute {
    Protocol,
    Host,
    Prefix,
    Token,
    Username,
    Password,
}

impl ConfigAttribute {
    /// All attributes, in validation order.
    pub const ALL: [Self; 6] = [
        Self::Protocol,
        Self::Host,
        Self::Prefix,
        Self::Token,
        Self::Username,
        Self::Password,
    ];

    /// Attribute name in the provider schema.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Host => "host",
            Self::Prefix => "prefix",
            Self::Token => "token",
            Self::Username => "username",
            Self::Password => "password",
        }
    }

    /// Human-readable label for diagnostics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Protocol => "Protocol",
            Self::Host => "Host",
            Self::Prefix => "Prefix",
            Self::Token => "Token",
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }

    /// Environment variable used when no explicit value is configured.
    #[must_use]
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Protocol => "JUPYTERHUB_PROTOCOL",
            Self::Host => "JUPYTERHUB_HOST",
            Self::Prefix => "JUPYTERHUB_PREFIX",
            Self::Token => "JUPYTERHUB_TOKEN",
            Self::Username => "JUPYTERHUB_USERNAME",
            Self::Password => "JUPYTERHUB_PASSWORD",
        }
    }

    /// Built-in default. Credentials have none.
    #[must_use]
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            Self::Protocol => Some(DEFAULT_PROTOCOL),
            Self::Host => Some(DEFAULT_HOST),
            Self::Prefix => Some(DEFAULT_PREFIX),
            Self::Token | Self::Username | Self::Password => None,
        }
    }

    #[must_use]
    pub fn is_sensitive(self) -> bool {
        matches!(self, Self::Token | Self::Username | Self::Password)
    }

    /// Look up an attribute by schema name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for ConfigAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Explicit provider configuration, as written by the practitioner.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub protocol: ConfigValue<String>,
    pub host: ConfigValue<String>,
    pub prefix: ConfigValue<String>,
    pub token: ConfigValue<String>,
    pub username: ConfigValue<String>,
    pub password: ConfigValue<String>,
}

impl ProviderConfig {
    /// Build from the host's raw attribute map. Keys outside the schema are ignored.
    #[must_use]
    pub fn from_raw(raw: &RawConfig) -> Self {
        let mut cfg = Self::default();
        for (key, value) in raw {
            if let Some(attr) = ConfigAttribute::from_name(key) {
                cfg.set(attr, value.clone());
            }
        }
        cfg
    }

    #[must_use]
    pub fn get(&self, attr: ConfigAttribute) -> &ConfigValue<String> {
        match attr {
            ConfigAttribute::Protocol => &self.protocol,
            ConfigAttribute::Host => &self.host,
            ConfigAttribute::Prefix => &self.prefix,
            ConfigAttribute::Token => &self.token,
            ConfigAttribute::Username => &self.username,
            ConfigAttribute::Password => &self.password,
        }
    }

    pub fn set(&mut self, attr: ConfigAttribute, value: ConfigValue<String>) {
        let slot = match attr {
            ConfigAttribute::Protocol => &mut self.protocol,
            ConfigAttribute::Host => &mut self.host,
            ConfigAttribute::Prefix => &mut self.prefix,
            ConfigAttribute::Token => &mut self.token,
            ConfigAttribute::Username => &mut self.username,
            ConfigAttribute::Password => &mut self.password,
        };
        *slot = value;
    }
}

fn redacted(value: &ConfigValue<String>) -> &'static str {
    match value {
        ConfigValue::Null => "null",
        ConfigValue::Unknown => "unknown",
        ConfigValue::Known(_) => "[REDACTED]",
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("prefix", &self.prefix)
            .field("token", &redacted(&self.token))
            .field("username", &redacted(&self.username))
            .field("password", &redacted(&self.password))
            .finish()
    }
}

/// Source of environment variables.
pub trait EnvLookup: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher + Send + Sync> EnvLookup for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Fully resolved connection settings.
///
/// Produced by [`crate::domain::resolver::resolve`]; at least one of
/// `token` or the `username`/`password` pair is present.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub protocol: String,
    pub host: String,
    pub prefix: String,
    pub token: Option<SecretString>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl EffectiveConfig {
    /// Endpoint URI used for logging: `protocol://host/prefix`. Never contains credentials.
    #[must_use]
    pub fn endpoint_uri(&self) -> String {
        format!("{}://{}/{}", self.protocol, self.host, self.prefix)
    }

    /// Credentials to send with every request. A token wins over a username/password pair.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.expose_secret().is_empty()) {
            return Some(Credentials::Token(token.clone()));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password))
                if !username.is_empty() && !password.expose_secret().is_empty() =>
            {
                Some(Credentials::Basic {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Authentication material sent to the hub.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// API token, sent as `Authorization: token <value>`.
    Token(SecretString),
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: SecretString,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn effective(token: Option<&str>, username: Option<&str>, password: Option<&str>) -> EffectiveConfig {
        EffectiveConfig {
            protocol: DEFAULT_PROTOCOL.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            prefix: DEFAULT_PREFIX.to_owned(),
            token: token.map(|t| SecretString::from(t.to_owned())),
            username: username.map(str::to_owned),
            password: password.map(|p| SecretString::from(p.to_owned())),
        }
    }

    #[test]
    fn env_vars_share_the_prefix() {
        for attr in ConfigAttribute::ALL {
            assert!(attr.env_var().starts_with(ENV_PREFIX));
            assert_eq!(
                attr.env_var()[ENV_PREFIX.len()..].to_lowercase(),
                attr.name()
            );
        }
    }

    #[test]
    fn from_raw_maps_known_keys_and_ignores_others() {
        let mut raw = RawConfig::new();
        raw.insert("host".to_owned(), ConfigValue::known("hub.example.com"));
        raw.insert("token".to_owned(), ConfigValue::Unknown);
        raw.insert("region".to_owned(), ConfigValue::known("eu"));

        let cfg = ProviderConfig::from_raw(&raw);
        assert_eq!(cfg.host, ConfigValue::Known("hub.example.com".to_owned()));
        assert!(cfg.token.is_unknown());
        assert!(cfg.protocol.is_null());
    }

    #[test]
    fn debug_redacts_credentials() {
        let cfg = ProviderConfig {
            token: ConfigValue::known("s3cr3t"),
            password: ConfigValue::known("hunter2"),
            ..ProviderConfig::default()
        };

        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));

        let rendered = format!("{:?}", effective(Some("s3cr3t"), None, None));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn config_file_rejects_unknown_keys() {
        let parsed: Result<ProviderConfig, _> =
            serde_json::from_str(r#"{"host": "hub:8000", "hostname": "typo"}"#);
        assert!(parsed.is_err());

        let parsed: ProviderConfig = serde_json::from_str(r#"{"host": "hub:8000"}"#).unwrap();
        assert_eq!(parsed.host, ConfigValue::Known("hub:8000".to_owned()));
        assert!(parsed.token.is_null());
    }

    #[test]
    fn token_wins_over_basic_credentials() {
        let creds = effective(Some("tok"), Some("alice"), Some("pw")).credentials();
        assert!(matches!(creds, Some(Credentials::Token(t)) if t.expose_secret() == "tok"));

        let creds = effective(None, Some("alice"), Some("pw")).credentials();
        assert!(matches!(creds, Some(Credentials::Basic { ref username, .. }) if username == "alice"));

        assert!(effective(None, Some("alice"), None).credentials().is_none());
    }

    #[test]
    fn endpoint_uri_joins_parts() {
        let mut cfg = effective(Some("tok"), None, None);
        cfg.prefix = "jupyter/".to_owned();
        assert_eq!(cfg.endpoint_uri(), "http://localhost:8000/jupyter/");
    }
}
