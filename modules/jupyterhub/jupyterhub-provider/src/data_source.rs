//! `jupyterhub_user` data source.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jupyterhub_sdk::{
    Attribute, AttributeType, ConfigValue, DataSource, Diagnostics, JupyterHubClient, ReadRequest,
    Schema,
};

use crate::domain::user_query;
use crate::provider::PROVIDER_TYPE_NAME;

/// Reads a single JupyterHub user by name.
#[derive(Default)]
pub struct UserDataSource {
    client: Option<Arc<dyn JupyterHubClient>>,
}

impl fmt::Debug for UserDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDataSource")
            .field("configured", &self.client.is_some())
            .finish()
    }
}

impl UserDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataSource for UserDataSource {
    fn type_name(&self) -> String {
        format!("{PROVIDER_TYPE_NAME}_user")
    }

    fn schema(&self) -> Schema {
        Schema::new("JupyterHub user.")
            .with_attribute(
                "name",
                Attribute::required(AttributeType::String, "JupyterHub username."),
            )
            .with_attribute(
                "admin",
                Attribute::computed(AttributeType::Bool, "User is administrator."),
            )
            .with_attribute(
                "roles",
                Attribute::computed(AttributeType::StringList, "Roles assigned to user."),
            )
            .with_attribute(
                "groups",
                Attribute::computed(AttributeType::StringList, "Groups assigned to user."),
            )
    }

    fn configure(&mut self, client: Arc<dyn JupyterHubClient>) {
        self.client = Some(client);
    }

    async fn read(&self, request: &ReadRequest) -> Result<serde_json::Value, Diagnostics> {
        let Some(client) = &self.client else {
            return Err(Diagnostics::error(
                "Unconfigured JupyterHub Client",
                "The data source was read before the provider was configured. \
                 Please report this issue to the provider developers.",
            ));
        };

        let name = request.attribute("name");
        match &name {
            ConfigValue::Known(_) => {}
            ConfigValue::Null => {
                let mut diags = Diagnostics::new();
                diags.add_attribute_error(
                    "name",
                    "Missing JupyterHub Username",
                    "The name attribute is required.",
                );
                return Err(diags);
            }
            ConfigValue::Unknown => {
                let mut diags = Diagnostics::new();
                diags.add_attribute_error(
                    "name",
                    "Unknown JupyterHub Username",
                    "The name attribute must be known before the user can be read.",
                );
                return Err(diags);
            }
        }

        let state = user_query::fetch_user(client.as_ref(), &name.display_form()).await?;

        serde_json::to_value(&state)
            .map_err(|e| Diagnostics::error("Unable to Encode JupyterHub User", e.to_string()))
    }
}
