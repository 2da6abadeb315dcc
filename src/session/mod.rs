//! Session continuity across runs. The token kept under `authToken` is a
//! base64-encoded `{ "userId": ... }` blob matched against the local
//! `users` collection — a client-side convenience only. It authenticates
//! nothing and must never be treated as a credential.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::User;
use crate::store::{KvStore, UserStore, AUTH_TOKEN_KEY};
use crate::utils::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    #[serde(rename = "userId")]
    user_id: String,
}

pub struct Session {
    store: Arc<dyn KvStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn sign_in(&self, user: &User) -> Result<(), AppError> {
        let claims = serde_json::to_vec(&TokenClaims {
            user_id: user.id.clone(),
        })?;
        self.store.set(AUTH_TOKEN_KEY, &STANDARD.encode(claims))?;
        info!(user_id = %user.id, "session token stored");
        Ok(())
    }

    /// Restores the signed-in user from the stored token. Malformed or
    /// dangling tokens are evicted and yield no user.
    pub fn current_user(&self, users: &UserStore) -> Result<Option<User>, AppError> {
        let Some(token) = self.store.get(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };

        let claims: Option<TokenClaims> = STANDARD
            .decode(&token)
            .ok()
            .and_then(|raw| serde_json::from_slice(&raw).ok());

        let Some(claims) = claims else {
            warn!("discarding malformed session token");
            self.store.remove(AUTH_TOKEN_KEY)?;
            return Ok(None);
        };

        match users.find(&claims.user_id)? {
            Some(user) => Ok(Some(user)),
            None => {
                warn!(user_id = %claims.user_id, "session token references unknown user");
                self.store.remove(AUTH_TOKEN_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn sign_out(&self) -> Result<(), AppError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn fixtures() -> (Arc<MemoryStore>, Session, UserStore, User) {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        let users = UserStore::new(store.clone());
        let user = User {
            id: "u1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            country: None,
        };
        users.save(&user).unwrap();
        (store, session, users, user)
    }

    #[test]
    fn sign_in_round_trips_through_the_token() {
        let (_store, session, users, user) = fixtures();
        assert!(session.current_user(&users).unwrap().is_none());

        session.sign_in(&user).unwrap();
        assert_eq!(session.current_user(&users).unwrap(), Some(user));

        session.sign_out().unwrap();
        assert!(session.current_user(&users).unwrap().is_none());
    }

    #[test]
    fn malformed_token_is_evicted() {
        let (store, session, users, _user) = fixtures();
        store.set(AUTH_TOKEN_KEY, "!!not-base64!!").unwrap();

        assert!(session.current_user(&users).unwrap().is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn dangling_token_is_evicted() {
        let (store, session, users, _user) = fixtures();
        let token = STANDARD.encode(br#"{"userId":"ghost"}"#);
        store.set(AUTH_TOKEN_KEY, &token).unwrap();

        assert!(session.current_user(&users).unwrap().is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }
}
