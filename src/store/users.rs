use std::sync::Arc;

use super::{KvStore, USERS_KEY};
use crate::models::User;
use crate::utils::error::AppError;

/// Typed view over the `users` collection.
#[derive(Clone)]
pub struct UserStore {
    store: Arc<dyn KvStore>,
}

impl UserStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<User>, AppError> {
        match self.store.get(USERS_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn find(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.list()?.into_iter().find(|user| user.id == id))
    }

    /// Inserts the user, or replaces the record with the same id.
    pub fn save(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.list()?;
        match users.iter_mut().find(|candidate| candidate.id == user.id) {
            Some(slot) => *slot = user.clone(),
            None => users.push(user.clone()),
        }
        let text = serde_json::to_string(&users)?;
        self.store.set(USERS_KEY, &text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: email.to_string(),
            phone: None,
            country: None,
        }
    }

    #[test]
    fn save_and_find() {
        let users = UserStore::new(Arc::new(MemoryStore::new()));
        assert!(users.find("u1").unwrap().is_none());

        users.save(&user("u1", "ana@example.com")).unwrap();
        users.save(&user("u2", "bea@example.com")).unwrap();
        assert_eq!(users.list().unwrap().len(), 2);
        assert_eq!(users.find("u1").unwrap().unwrap().email, "ana@example.com");
    }

    #[test]
    fn save_replaces_existing_record() {
        let users = UserStore::new(Arc::new(MemoryStore::new()));
        users.save(&user("u1", "ana@example.com")).unwrap();
        users.save(&user("u1", "ana@work.example.com")).unwrap();

        assert_eq!(users.list().unwrap().len(), 1);
        assert_eq!(
            users.find("u1").unwrap().unwrap().email,
            "ana@work.example.com"
        );
    }
}
