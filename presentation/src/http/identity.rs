//! Caller identity from the fronting auth proxy
//!
//! The proxy authenticates the caller and forwards the result as
//! `x-user-id`, `x-user-name` and `x-user-role` headers. A request without
//! a user id is anonymous; participants never need one.

use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};
use pulse_domain::{Identity, Role};
use std::convert::Infallible;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The caller, if the proxy identified one
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let Some(user_id) = header(USER_ID_HEADER) else {
            return Caller(None);
        };
        let mut identity = Identity::new(user_id);
        if let Some(name) = header(USER_NAME_HEADER) {
            identity = identity.with_display_name(name);
        }
        // An unknown role claim counts as no role
        if let Some(role) = header(USER_ROLE_HEADER).and_then(|r| r.parse::<Role>().ok()) {
            identity = identity.with_role(role);
        }
        Caller(Some(identity))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller::from_headers(&parts.headers))
    }
}
