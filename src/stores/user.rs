//! Session context for the signed-in user

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::models::CurrentUser;
use crate::storage::{StorageError, TokenStorage};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionState {
    user: Option<CurrentUser>,
    authenticated: bool,
}

/// Who is using the client right now
///
/// Passed explicitly to whatever needs the current user; there is one per
/// running client.
pub struct Session {
    state: RwLock<SessionState>,
    storage: Arc<dyn TokenStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                user: None,
                authenticated: false,
            }),
            storage,
        }
    }

    /// Session pre-populated with the local demo user
    pub fn seeded(storage: Arc<dyn TokenStorage>) -> Self {
        let session = Self::new(storage);
        session.set_user(CurrentUser::seeded());
        session
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state.read().ok().and_then(|s| s.user.clone())
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.state.read().ok().and_then(|s| s.user.as_ref().map(|u| u.id))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().map(|s| s.authenticated).unwrap_or(false)
    }

    pub fn set_user(&self, user: CurrentUser) {
        if let Ok(mut state) = self.state.write() {
            state.user = Some(user);
            state.authenticated = true;
        }
    }

    /// Store an opaque bearer token for subsequent requests
    pub fn login(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_token(token)?;
        if let Ok(mut state) = self.state.write() {
            state.authenticated = true;
        }
        info!("Stored auth token");
        Ok(())
    }

    pub fn logout(&self) {
        self.storage.clear_token();
        if let Ok(mut state) = self.state.write() {
            state.user = None;
            state.authenticated = false;
        }
        info!("Logged out");
    }

    /// Reload the current user's profile from the server
    pub async fn refresh(&self, api: &ApiClient) -> Result<CurrentUser, ApiError> {
        let user_id = self.current_user_id().unwrap_or(CurrentUser::seeded().id);
        let user: CurrentUser = api.get_user(user_id).await?.into();
        self.set_user(user.clone());
        Ok(user)
    }
}
