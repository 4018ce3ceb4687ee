use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;

use crate::auth::validate_jwt;
use crate::state::AppState;

/// Authenticated identity of the requester
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: String,
}

impl SessionUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}

/// Resolves the identity behind a request, or `None` for anonymous requests.
/// Never fails: a bad credential is the same as no credential.
pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<SessionUser>;
}

/// HS256 session tokens from `Authorization: Bearer` or the session cookie
#[derive(Clone, Debug)]
pub struct JwtSessionResolver {
    secret: String,
    cookie_name: String,
}

impl JwtSessionResolver {
    pub fn new(secret: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: cookie_name.into(),
        }
    }

    fn token<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        bearer_token(headers).or_else(|| cookie_value(headers, &self.cookie_name))
    }
}

impl SessionResolver for JwtSessionResolver {
    fn resolve(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let token = self.token(headers)?;

        match validate_jwt(token, &self.secret) {
            Ok(claims) if !claims.sub.trim().is_empty() => Some(SessionUser::new(claims.sub)),
            Ok(_) => {
                tracing::debug!("Session token has an empty subject");
                None
            }
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                None
            }
        }
    }
}

/// Extract JWT token from Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Identity resolved for this request, handed to handlers as an argument
#[derive(Clone, Debug, Default)]
pub struct Session(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Session(state.sessions.resolve(&parts.headers)))
    }
}
