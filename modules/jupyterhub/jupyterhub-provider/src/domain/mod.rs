//! Domain layer for the JupyterHub provider.

pub mod error;
pub mod resolver;
pub mod user_query;

pub use error::{ConfigError, ConfigErrors, DomainError};
pub use resolver::{ClientFactory, configure, resolve};
pub use user_query::{UserState, fetch_user, map_user, normalize_lookup_name};
