use std::sync::Arc;

use crate::api::AuthApi;
use storage::repository::CredentialStore;
use vocab_core::model::UserProfile;

/// Per-screen authentication state.
///
/// Every protected screen starts in `Checking` and resolves to one of the
/// other two; there is no cross-screen cache of the result beyond the
/// stored token/profile pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Checking,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl GateState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateState::Authenticated(_))
    }
}

/// Resolves whether the current stored session is still valid.
#[derive(Clone)]
pub struct AuthGate {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
}

impl AuthGate {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self { api, store }
    }

    /// Run the session check once.
    ///
    /// An absent token short-circuits to `Unauthenticated`. Otherwise the
    /// backend decides: an authenticated payload refreshes the cached
    /// profile; anything else (including transport errors) clears the
    /// stored session. Never returns `Checking`.
    pub async fn resolve(&self) -> GateState {
        match self.store.token().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.clear_session().await;
                return GateState::Unauthenticated;
            }
            Err(err) => {
                tracing::warn!(error = %err, "token lookup failed during session check");
                return GateState::Unauthenticated;
            }
        }

        match self.api.me().await {
            Ok(check) if check.authenticated => match check.user {
                Some(user) => {
                    if let Err(err) = self.store.set_user(&user).await {
                        tracing::warn!(error = %err, "failed to cache user profile");
                    }
                    GateState::Authenticated(user)
                }
                None => {
                    self.clear_session().await;
                    GateState::Unauthenticated
                }
            },
            Ok(_) => {
                self.clear_session().await;
                GateState::Unauthenticated
            }
            Err(err) => {
                tracing::debug!(error = %err, "session check failed");
                self.clear_session().await;
                GateState::Unauthenticated
            }
        }
    }

    async fn clear_session(&self) {
        if let Err(err) = self.store.clear().await {
            tracing::warn!(error = %err, "failed to clear stored session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthPayload, SessionCheck};
    use crate::error::ApiError;
    use async_trait::async_trait;
    use storage::repository::InMemoryCredentialStore;
    use vocab_core::model::UserId;

    struct FakeAuthApi {
        me_response: Result<SessionCheck, ()>,
    }

    #[async_trait]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, _: &str, _: &str) -> Result<AuthPayload, ApiError> {
            unimplemented!("gate tests only call me()")
        }

        async fn register(&self, _: &str, _: &str, _: &str) -> Result<AuthPayload, ApiError> {
            unimplemented!("gate tests only call me()")
        }

        async fn me(&self) -> Result<SessionCheck, ApiError> {
            self.me_response
                .clone()
                .map_err(|()| ApiError::Decode("fake failure".into()))
        }

        async fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new(UserId::new(5), "tam", "tam@example.com")
    }

    #[tokio::test]
    async fn missing_token_short_circuits_to_unauthenticated() {
        let api = Arc::new(FakeAuthApi {
            me_response: Ok(SessionCheck {
                authenticated: true,
                user: Some(profile()),
            }),
        });
        let store = Arc::new(InMemoryCredentialStore::new());
        let gate = AuthGate::new(api, store);

        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn authenticated_payload_caches_profile() {
        let api = Arc::new(FakeAuthApi {
            me_response: Ok(SessionCheck {
                authenticated: true,
                user: Some(profile()),
            }),
        });
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_token("jwt").await.unwrap();
        let gate = AuthGate::new(api, store.clone());

        let state = gate.resolve().await;

        assert_eq!(state, GateState::Authenticated(profile()));
        assert_eq!(store.user().await.unwrap(), Some(profile()));
    }

    #[tokio::test]
    async fn unauthenticated_payload_clears_session() {
        let api = Arc::new(FakeAuthApi {
            me_response: Ok(SessionCheck {
                authenticated: false,
                user: None,
            }),
        });
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_token("stale").await.unwrap();
        let gate = AuthGate::new(api, store.clone());

        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
        assert_eq!(store.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn transport_error_clears_session() {
        let api = Arc::new(FakeAuthApi { me_response: Err(()) });
        let store = Arc::new(InMemoryCredentialStore::new());
        store.set_token("stale").await.unwrap();
        let gate = AuthGate::new(api, store.clone());

        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
        assert_eq!(store.token().await.unwrap(), None);
    }
}
