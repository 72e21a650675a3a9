use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::token::AccessToken;
use crate::observability::metrics::get_metrics;

/// Holder for the most recently acquired access token.
///
/// Last write wins. Every read and write takes the lock, so a reader sees
/// either the previous or the new token, never a partial value.
#[derive(Debug, Clone, Default)]
pub struct TokenSlot {
    inner: Arc<RwLock<Option<AccessToken>>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot unconditionally
    pub async fn set(&self, token: AccessToken) {
        *self.inner.write().await = Some(token);
        get_metrics().await.token_present.set(1);
    }

    pub async fn get(&self) -> Option<AccessToken> {
        self.inner.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_until_first_set() {
        let slot = TokenSlot::new();
        assert!(slot.is_empty().await);
        assert!(slot.get().await.is_none());

        slot.set(AccessToken::new("first".to_owned())).await;
        assert_eq!(slot.get().await.map(|t| t.value), Some("first".to_owned()));
    }

    #[tokio::test]
    async fn last_write_wins_across_clones() {
        let slot = TokenSlot::new();
        let writer = slot.clone();

        writer.set(AccessToken::new("A".to_owned())).await;
        writer.set(AccessToken::new("B".to_owned())).await;

        assert_eq!(slot.get().await.map(|t| t.value), Some("B".to_owned()));
    }

    #[test]
    fn debug_output_hides_token_value() {
        let token = AccessToken::new("super-secret".to_owned());
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
