//! Local persistence: an opaque key-value text store (the contract of a
//! browser's localStorage) plus typed repositories for the collections
//! kept in it.

use thiserror::Error;

mod bookings;
mod file;
mod memory;
mod users;

pub use bookings::BookingStore;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use users::UserStore;

/// Serialized list of booking records.
pub const BOOKINGS_KEY: &str = "bookings";
/// Serialized list of known users.
pub const USERS_KEY: &str = "users";
/// Single opaque session token value.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store contents: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// String-keyed text store. Implementations are internally synchronized;
/// values are opaque to the store itself.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
