//! Process-local session store.

use applytrack_core::{Result, SessionStore, UserEmail};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Session store that lives only as long as the process.
///
/// Useful for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: RwLock<Option<UserEmail>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a logged-in user
    pub fn with_user(user: UserEmail) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn current_user(&self) -> Result<Option<UserEmail>> {
        Ok(self.user.read().await.clone())
    }

    async fn set_current_user(&self, user: &UserEmail) -> Result<()> {
        *self.user.write().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.user.write().await = None;
        Ok(())
    }
}
