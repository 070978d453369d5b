//! The session gate: resolves callers to user ids.
//!
//! Deliberately thin. Sessions live in memory for the process lifetime and
//! there is no way around the gate; the source system's testing bypass is
//! not reproduced here.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use seekho_core::model::UserId;

use crate::error::GateError;

/// Opaque bearer token identifying one signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: UserId,
    pub token: SessionToken,
}

#[derive(Clone, Default)]
pub struct SessionGate {
    sessions: Arc<Mutex<HashMap<String, UserId>>>,
}

impl SessionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user and open a session for them.
    ///
    /// # Errors
    ///
    /// Returns `GateError::MissingFields` when name or email is blank.
    pub fn register(&self, name: &str, email: &str) -> Result<Registration, GateError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(GateError::MissingFields);
        }
        let user_id = UserId::generate();
        let token = SessionToken::generate();
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| GateError::Internal(e.to_string()))?;
        sessions.insert(token.as_str().to_owned(), user_id.clone());
        Ok(Registration { user_id, token })
    }

    /// Resolve a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Unauthorized` for unknown tokens.
    pub fn resolve(&self, token: &str) -> Result<UserId, GateError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| GateError::Internal(e.to_string()))?;
        sessions
            .get(token)
            .cloned()
            .ok_or(GateError::Unauthorized)
    }

    /// Drop a session, if it exists.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Internal` if the session store is unavailable.
    pub fn sign_out(&self, token: &str) -> Result<(), GateError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| GateError::Internal(e.to_string()))?;
        sessions.remove(token);
        Ok(())
    }
}
