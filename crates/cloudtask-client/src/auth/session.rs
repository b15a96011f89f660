/*
[INPUT]:  Issued tokens, token store, current time
[OUTPUT]: Usable bearer token or a typed reason why there is none
[POS]:    Auth layer - session lifecycle shared by every API caller
[UPDATE]: When adding token refresh or changing expiry rules
*/

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{MemoryTokenStore, TokenStore, token_expiry};
use crate::http::{CloudTaskError, Result};

/// Stored session with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Wrap a freshly issued token, reading its expiry if it has one
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        let token = token.into();
        let expires_at = token_expiry(&token);
        Self {
            token,
            email: email.into(),
            issued_at: Utc::now(),
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Thread-safe session shared by the gateway and every page
///
/// Clones share the same slot; the backing store mirrors every change.
#[derive(Debug, Clone)]
pub struct SessionContext {
    data: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    /// Create an empty context backed by `store`
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Context that persists nothing
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Load whatever the store holds into memory
    ///
    /// Returns true when a session was found.
    pub async fn restore(&self) -> Result<bool> {
        let loaded = self.store.load().await?;
        let found = loaded.is_some();
        if let Some(session) = &loaded {
            tracing::debug!(
                email = %session.email,
                expired = session.is_expired(),
                "session restored from store"
            );
        }
        *self.data.write().unwrap_or_else(|e| e.into_inner()) = loaded;
        Ok(found)
    }

    /// Record a newly issued token in memory and in the store
    pub async fn establish(&self, token: String, email: &str) -> Result<Session> {
        let session = Session::new(token, email);
        self.store.save(&session).await?;
        *self.data.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        tracing::info!(email = %session.email, expires_at = ?session.expires_at, "session established");
        Ok(session)
    }

    /// Current session, expired or not
    pub fn session(&self) -> Option<Session> {
        self.data.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Current raw token, expired or not
    pub fn token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    /// Token to put in the Authorization header
    pub fn bearer_token(&self) -> Result<String> {
        match self.session() {
            None => Err(CloudTaskError::MissingToken),
            Some(session) if session.is_expired() => Err(CloudTaskError::TokenExpired),
            Some(session) => Ok(session.token),
        }
    }

    /// True when a token is present and not known to be expired
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_ok()
    }

    /// Check if the session is missing or expired
    pub fn is_expired(&self) -> bool {
        !self.is_authenticated()
    }

    /// Drop the session from memory and the store
    pub async fn clear(&self) -> Result<()> {
        *self.data.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.store.clear().await?;
        tracing::info!("session cleared");
        Ok(())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::in_memory()
    }
}
