//! Client trait for the JupyterHub REST API.
//!
//! The provider hands an `Arc<dyn JupyterHubClient>` to its data sources
//! after configuration. Implementations hold only resolved connection
//! settings, so a handle can be shared between concurrent lookups.

use async_trait::async_trait;

use crate::error::JupyterHubError;
use crate::models::HubUser;

/// Read access to JupyterHub users.
///
/// ```ignore
/// let user = client.get_user("alice").await?;
/// assert!(user.admin);
/// ```
#[async_trait]
pub trait JupyterHubClient: Send + Sync {
    /// Fetch a single user by name.
    ///
    /// # Arguments
    ///
    /// * `name` - The JupyterHub username, exactly as stored by the hub
    ///
    /// # Errors
    ///
    /// - `Status` if the hub answered with a non-success status (404 for unknown users)
    /// - `Transport` if the request could not be sent or the body not read
    /// - `Decode` if the response body is not a user object
    async fn get_user(&self, name: &str) -> Result<HubUser, JupyterHubError>;
}
