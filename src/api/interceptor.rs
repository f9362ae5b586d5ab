//! Hooks run uniformly around every request made by the client

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

use super::error::ApiError;
use crate::router::{Navigator, LOGIN_PATH};
use crate::storage::TokenStorage;

pub trait Interceptor: Send + Sync {
    /// Adjust outgoing headers before the request is sent
    fn on_request(&self, _headers: &mut HeaderMap) -> Result<(), ApiError> {
        Ok(())
    }

    /// Observe a normalized error before it is returned to the caller
    fn on_error(&self, _error: &ApiError) {}
}

/// Attaches `Authorization: Bearer <token>` when a token is stored
pub struct AuthInterceptor {
    storage: Arc<dyn TokenStorage>,
}

impl AuthInterceptor {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }
}

impl Interceptor for AuthInterceptor {
    fn on_request(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        if let Some(token) = self.storage.token() {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Unexpected(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }
        Ok(())
    }
}

/// Ends the session on 401: drops the stored token and sends the user to login
pub struct UnauthorizedInterceptor {
    storage: Arc<dyn TokenStorage>,
    navigator: Arc<dyn Navigator>,
}

impl UnauthorizedInterceptor {
    pub fn new(storage: Arc<dyn TokenStorage>, navigator: Arc<dyn Navigator>) -> Self {
        Self { storage, navigator }
    }
}

impl Interceptor for UnauthorizedInterceptor {
    fn on_error(&self, error: &ApiError) {
        if error.is_unauthorized() {
            warn!("Session rejected by server, clearing stored token");
            self.storage.clear_token();
            self.navigator.redirect(LOGIN_PATH);
        }
    }
}
