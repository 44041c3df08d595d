//! Access token persistence.

use super::{SharedStore, StorageResult};

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Reads and writes the signed-in user's access token.
#[derive(Clone)]
pub struct TokenStore {
    store: SharedStore,
}

impl TokenStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Current token, if any. Blank values count as signed out.
    pub fn token(&self) -> StorageResult<Option<String>> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .filter(|t| !t.trim().is_empty()))
    }

    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        self.store.set(ACCESS_TOKEN_KEY, token)
    }

    /// Sign out.
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(ACCESS_TOKEN_KEY)
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}
