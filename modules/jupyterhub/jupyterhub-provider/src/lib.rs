#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! JupyterHub Provider
//!
//! Reads JupyterHub users (admin flag, roles, groups) for an
//! infrastructure-as-code orchestrator.
//!
//! - [`JupyterHubProvider`] resolves connection settings and builds the client
//! - [`UserDataSource`] implements the `jupyterhub_user` data source
//!
//! ## Configuration
//!
//! Every attribute is optional and falls back to an environment variable,
//! then to a default:
//!
//! | attribute  | environment           | default          |
//! |------------|-----------------------|------------------|
//! | `protocol` | `JUPYTERHUB_PROTOCOL` | `http`           |
//! | `host`     | `JUPYTERHUB_HOST`     | `localhost:8000` |
//! | `prefix`   | `JUPYTERHUB_PREFIX`   | `/`              |
//! | `token`    | `JUPYTERHUB_TOKEN`    |                  |
//! | `username` | `JUPYTERHUB_USERNAME` |                  |
//! | `password` | `JUPYTERHUB_PASSWORD` |                  |
//!
//! Either `token` or both `username` and `password` must be set.

pub mod config;
pub mod data_source;
pub mod domain;
pub mod infra;
pub mod provider;

pub use config::{EffectiveConfig, EnvLookup, ProcessEnv, ProviderConfig};
pub use data_source::UserDataSource;
pub use domain::{ClientFactory, DomainError, UserState};
pub use infra::{HttpClientFactory, HttpJupyterHubClient};
pub use provider::{JupyterHubProvider, PROVIDER_TYPE_NAME};
