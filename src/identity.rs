//! Middleware that works out who is making a request.
//!
//! Authentication happens in front of the app, e.g. in a reverse proxy, which
//! passes the authenticated user's name along in a request header. The name
//! is recorded as the owner of new trips and the creator of new expenses.

use std::fmt::Display;

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// The header that reverse proxies commonly use for the authenticated user.
pub const DEFAULT_USER_HEADER: &str = "x-forwarded-user";

/// The name of the user making a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserName(String);

impl UserName {
    /// Create a user name, trimming surrounding whitespace.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_owned())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where to find the user name in a request.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// The lowercase name of the header holding the user name.
    pub header_name: String,
    /// The user name to use when the header is missing or empty.
    pub default_user: UserName,
}

impl IdentityConfig {
    /// Create the config from a header name and fallback user name.
    pub fn new(header_name: &str, default_user: &str) -> Self {
        Self {
            header_name: header_name.trim().to_ascii_lowercase(),
            default_user: UserName::new(default_user),
        }
    }

    fn user_name_from_request(&self, request: &Request) -> UserName {
        request
            .headers()
            .get(self.header_name.as_str())
            .and_then(|header| header.to_str().ok())
            .map(UserName::new)
            .filter(|name| !name.0.is_empty())
            .unwrap_or_else(|| self.default_user.clone())
    }
}

impl FromRef<AppState> for IdentityConfig {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

/// Middleware function that places the [UserName] of the requester into the request.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<UserName>` to receive the user name.
pub async fn identify_user(
    State(config): State<IdentityConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_name = config.user_name_from_request(&request);
    tracing::debug!("Request made by {user_name}");

    request.extensions_mut().insert(user_name);
    next.run(request).await
}
