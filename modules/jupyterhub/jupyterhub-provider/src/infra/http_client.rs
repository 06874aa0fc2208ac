//! `reqwest`-based JupyterHub REST client.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jupyterhub_sdk::{HubUser, JupyterHubClient, JupyterHubError};
use reqwest::header;
use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use crate::config::{Credentials, EffectiveConfig};
use crate::domain::ClientFactory;

const USER_AGENT: &str = concat!("jupyterhub-provider/", env!("CARGO_PKG_VERSION"));

/// Client for the JupyterHub REST API (`<prefix>hub/api/`).
pub struct HttpJupyterHubClient {
    http: reqwest::Client,
    api_base: Url,
    credentials: Credentials,
}

impl fmt::Debug for HttpJupyterHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match self.credentials {
            Credentials::Token(_) => "token",
            Credentials::Basic { .. } => "basic",
        };
        f.debug_struct("HttpJupyterHubClient")
            .field("api_base", &self.api_base.as_str())
            .field("auth", &auth)
            .finish_non_exhaustive()
    }
}

impl HttpJupyterHubClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the protocol is not `http`/`https`, the
    /// host and prefix do not form a valid URL, or no credentials are set.
    pub fn new(config: &EffectiveConfig) -> Result<Self, JupyterHubError> {
        let api_base = api_base_url(config)?;
        let credentials = config.credentials().ok_or_else(|| {
            JupyterHubError::invalid_config("either a token or a username and password is required")
        })?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| JupyterHubError::invalid_config(e.to_string()))?;

        debug!(api_base = %api_base, "Built JupyterHub HTTP client");
        Ok(Self {
            http,
            api_base,
            credentials,
        })
    }

    /// Base URL of the REST API, always ending in `/`.
    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn user_url(&self, name: &str) -> Result<Url, JupyterHubError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| JupyterHubError::invalid_config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["users", name]);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Token(token) => request.header(
                header::AUTHORIZATION,
                format!("token {}", token.expose_secret()),
            ),
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }
}

/// Ensure the prefix starts and ends with `/`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

fn api_base_url(config: &EffectiveConfig) -> Result<Url, JupyterHubError> {
    let protocol = config.protocol.as_str();
    if !matches!(protocol, "http" | "https") {
        return Err(JupyterHubError::invalid_config(format!(
            "unsupported protocol '{protocol}', expected 'http' or 'https'"
        )));
    }
    if config.host.trim().is_empty() {
        return Err(JupyterHubError::invalid_config("host is empty"));
    }

    let raw = format!(
        "{protocol}://{}{}hub/api/",
        config.host,
        normalize_prefix(&config.prefix)
    );
    Url::parse(&raw).map_err(|e| JupyterHubError::invalid_config(format!("invalid URL '{raw}': {e}")))
}

#[async_trait]
impl JupyterHubClient for HttpJupyterHubClient {
    #[tracing::instrument(skip(self))]
    async fn get_user(&self, name: &str) -> Result<HubUser, JupyterHubError> {
        let url = self.user_url(name)?;
        debug!(url = %url, "GET JupyterHub user");

        let response = self
            .authorize(self.http.get(url))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| JupyterHubError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read JupyterHub error body");
                format!("<unreadable body: {e}>")
            });
            debug!(status = status.as_u16(), "JupyterHub returned an error status");
            return Err(JupyterHubError::status(status.as_u16(), body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| JupyterHubError::transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| JupyterHubError::decode(e.to_string()))
    }
}

/// [`ClientFactory`] producing [`HttpJupyterHubClient`] handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn create_client(
        &self,
        config: &EffectiveConfig,
    ) -> Result<Arc<dyn JupyterHubClient>, JupyterHubError> {
        Ok(Arc::new(HttpJupyterHubClient::new(config)?))
    }
}
