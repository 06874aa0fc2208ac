//! Models returned by the JupyterHub API.

use serde::{Deserialize, Serialize};

/// A JupyterHub user as returned by `GET /hub/api/users/{name}`.
///
/// Only the fields the provider reads are kept; the hub sends more
/// (`kind`, `server`, `last_activity`, ...) and those are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubUser {
    /// Username.
    pub name: String,

    /// Whether the user is a hub administrator.
    #[serde(default)]
    pub admin: bool,

    /// Role names, in the order the hub reports them.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Group names, in the order the hub reports them.
    #[serde(default)]
    pub groups: Vec<String>,
}
