//! User lookup and mapping for the `jupyterhub_user` data source.

use jupyterhub_sdk::{HubUser, JupyterHubClient};
use serde::Serialize;
use tracing::{info, warn};

use super::error::DomainError;

/// State of one `jupyterhub_user` data source instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserState {
    pub name: String,
    pub admin: bool,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

/// Strip the host's quoting from a username.
///
/// The host renders string values with one quote character on each side;
/// exactly one leading and one trailing character are removed. Escapes
/// inside the quotes are not interpreted.
///
/// # Errors
///
/// Returns `InvalidName` if the input is too short to carry quotes,
/// nothing is left after stripping them, or the name is `.` or `..`.
/// Those two are dot-segments in a URL path and would address a different
/// API endpoint than the user.
pub fn normalize_lookup_name(raw: &str) -> Result<&str, DomainError> {
    let mut chars = raw.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return Err(DomainError::invalid_name(raw, "expected a quoted value"));
    }
    match chars.as_str() {
        "" => Err(DomainError::invalid_name(raw, "name is empty")),
        "." | ".." => Err(DomainError::invalid_name(
            raw,
            "name cannot be a relative path segment",
        )),
        name => Ok(name),
    }
}

/// Map an API user into data source state.
///
/// `name` is the name that was looked up, so the state keeps the
/// practitioner's spelling even if the hub normalizes it. Roles and groups
/// keep the order the hub reports.
#[must_use]
pub fn map_user(name: &str, user: HubUser) -> UserState {
    UserState {
        name: name.to_owned(),
        admin: user.admin,
        roles: user.roles,
        groups: user.groups,
    }
}

/// Look up a user by its raw (host-quoted) name.
///
/// # Errors
///
/// - `InvalidName` if `raw_name` is not a usable quoted name
/// - `Query` with the client's error message if the lookup fails
#[tracing::instrument(skip_all, fields(user))]
pub async fn fetch_user(
    client: &dyn JupyterHubClient,
    raw_name: &str,
) -> Result<UserState, DomainError> {
    let name = normalize_lookup_name(raw_name)?;
    tracing::Span::current().record("user", name);
    info!("Reading JupyterHub user");

    let user = client.get_user(name).await.map_err(|e| {
        warn!(error = %e, "JupyterHub user lookup failed");
        DomainError::from(e)
    })?;

    Ok(map_user(name, user))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use jupyterhub_sdk::JupyterHubError;

    use super::*;

    struct FakeClient {
        response: Result<HubUser, JupyterHubError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn returning(response: Result<HubUser, JupyterHubError>) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl JupyterHubClient for FakeClient {
        async fn get_user(&self, name: &str) -> Result<HubUser, JupyterHubError> {
            self.calls.lock().unwrap().push(name.to_owned());
            self.response.clone()
        }
    }

    fn hub_user() -> HubUser {
        HubUser {
            name: "alice".to_owned(),
            admin: true,
            roles: vec!["a".to_owned(), "b".to_owned()],
            groups: vec!["g1".to_owned()],
        }
    }

    #[test]
    fn strips_one_character_from_each_end() {
        assert_eq!(normalize_lookup_name("\"alice\"").unwrap(), "alice");
        assert_eq!(normalize_lookup_name("'bob'").unwrap(), "bob");
        assert_eq!(normalize_lookup_name("\"\"x\"\"").unwrap(), "\"x\"");
    }

    #[test]
    fn rejects_inputs_without_room_for_quotes() {
        for raw in ["", "a", "\"\""] {
            let err = normalize_lookup_name(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidName { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_dot_segments() {
        for raw in ["\".\"", "\"..\""] {
            let err = normalize_lookup_name(raw).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidName { ref reason, .. } if reason.contains("path segment")),
                "{raw}"
            );
        }
        assert_eq!(normalize_lookup_name("\"...\"").unwrap(), "...");
        assert_eq!(normalize_lookup_name("\".alice\"").unwrap(), ".alice");
    }

    #[test]
    fn keeps_quotes_and_escapes_inside_the_name() {
        assert_eq!(normalize_lookup_name("\"o\"brien\"").unwrap(), "o\"brien");
        assert_eq!(normalize_lookup_name("\"a\\b\"").unwrap(), "a\\b");
    }

    #[test]
    fn strips_multibyte_characters_whole() {
        assert_eq!(normalize_lookup_name("\u{ab}jos\u{e9}\u{bb}").unwrap(), "jos\u{e9}");
    }

    #[test]
    fn roles_and_groups_stay_separate() {
        let state = map_user("alice", hub_user());
        assert_eq!(
            state,
            UserState {
                name: "alice".to_owned(),
                admin: true,
                roles: vec!["a".to_owned(), "b".to_owned()],
                groups: vec!["g1".to_owned()],
            }
        );
    }

    #[tokio::test]
    async fn fetch_queries_unquoted_name() {
        let client = FakeClient::returning(Ok(hub_user()));

        let state = fetch_user(&client, "\"alice\"").await.unwrap();

        assert_eq!(*client.calls.lock().unwrap(), vec!["alice".to_owned()]);
        assert!(state.admin);
        assert_eq!(state.roles, vec!["a", "b"]);
        assert_eq!(state.groups, vec!["g1"]);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_cause() {
        let cause = JupyterHubError::status(404, "{\"status\": 404, \"message\": \"Not Found\"}");
        let client = FakeClient::returning(Err(cause.clone()));

        let err = fetch_user(&client, "\"ghost\"").await.unwrap_err();

        assert!(matches!(err, DomainError::Query(_)));
        assert!(err.to_string().contains(&cause.to_string()));
    }

    #[tokio::test]
    async fn invalid_name_never_reaches_client() {
        let client = FakeClient::returning(Ok(hub_user()));

        let err = fetch_user(&client, "x").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidName { .. }));
        assert!(client.calls.lock().unwrap().is_empty());
    }
}
