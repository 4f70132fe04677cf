//! Forced-logout handling for authentication failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use storage::repository::CredentialStore;

/// Navigation seam the UI layer implements. The only destination the
/// services crate ever requests is the login route.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn to_login(&self);
}

/// Owns the "redirect in flight" flag so auth-failure handling has a
/// single entry point instead of ambient module state.
pub struct SessionController {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    redirecting: AtomicBool,
}

impl SessionController {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            redirecting: AtomicBool::new(false),
        }
    }

    /// React to a 401/403 from a protected endpoint: clear the stored
    /// session and navigate to login.
    ///
    /// Re-entrant calls while a redirect is in flight are suppressed; a
    /// burst of failing requests produces exactly one navigation.
    pub async fn handle_auth_failure(&self) {
        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "failed to clear stored session");
        }

        if self.redirecting.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!("authentication failure, redirecting to login");
        self.navigator.to_login().await;
        self.redirecting.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use storage::repository::InMemoryCredentialStore;

    struct CountingNavigator {
        navigations: AtomicUsize,
    }

    #[async_trait]
    impl Navigator for CountingNavigator {
        async fn to_login(&self) {
            // Yield so a concurrent failure can observe the in-flight flag.
            tokio::task::yield_now().await;
            self.navigations.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn concurrent_failures_navigate_once() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_token("jwt").await.unwrap();
        let navigator = Arc::new(CountingNavigator {
            navigations: AtomicUsize::new(0),
        });
        let controller = Arc::new(SessionController::new(store.clone(), navigator.clone()));

        tokio::join!(
            controller.handle_auth_failure(),
            controller.handle_auth_failure()
        );

        assert_eq!(navigator.navigations.load(Ordering::SeqCst), 1);
        assert_eq!(store.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failure_clears_token_and_profile() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_token("jwt").await.unwrap();
        let navigator = Arc::new(CountingNavigator {
            navigations: AtomicUsize::new(0),
        });
        let controller = SessionController::new(store.clone(), navigator);

        controller.handle_auth_failure().await;

        assert_eq!(store.token().await.unwrap(), None);
        assert_eq!(store.user().await.unwrap(), None);
    }
}
