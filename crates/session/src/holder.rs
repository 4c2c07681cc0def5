//! Authentication state holder.
//!
//! Sole writer of the two persisted session keys. Consumers read an
//! [`Identity`] snapshot or subscribe to [`AuthChange`]s; they never touch the
//! store directly.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use eara_auth::Identity;

use crate::notify::{Broadcaster, Subscription};
use crate::store::{SessionStore, StorageSubscription};
use crate::{AuthenticationError, LoginClient, LoginRequest, SessionConfig, SessionStateError, StoreError};

const FLAG_SET: &str = "true";

/// What caused an [`AuthChange`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChangeCause {
    LoggedIn,
    LoggedOut,
    /// Another tab changed the persisted session.
    ExternalChange,
    /// Corrupted persisted state was cleared.
    SessionRepaired,
}

/// Notification delivered to subscribers after the session changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChange {
    pub identity: Option<Identity>,
    pub cause: ChangeCause,
    pub occurred_at: DateTime<Utc>,
}

pub type AuthSubscription = Subscription<AuthChange>;

/// Single source of truth for "who is logged in".
///
/// The persisted session is resolved once in [`AuthStateHolder::new`], so a
/// constructed holder is always ready; no partially-resolved identity is ever
/// observable.
pub struct AuthStateHolder<S, L> {
    store: S,
    login_client: L,
    config: SessionConfig,
    snapshot: RwLock<Option<Identity>>,
    listeners: Broadcaster<AuthChange>,
    storage_events: Option<StorageSubscription>,
}

impl<S, L> core::fmt::Debug for AuthStateHolder<S, L>
where
    S: SessionStore,
    L: LoginClient,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthStateHolder")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl<S, L> AuthStateHolder<S, L>
where
    S: SessionStore,
    L: LoginClient,
{
    pub fn new(store: S, login_client: L) -> Self {
        Self::with_config(store, login_client, SessionConfig::default())
    }

    pub fn with_config(store: S, login_client: L, config: SessionConfig) -> Self {
        let storage_events = store.subscribe();
        let holder = Self {
            store,
            login_client,
            config,
            snapshot: RwLock::new(None),
            listeners: Broadcaster::new(),
            storage_events,
        };

        let resolved = holder.current_identity();
        holder.replace_snapshot(resolved);
        holder
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Exchange credentials for an identity and persist it.
    ///
    /// Nothing is written unless the exchange succeeds. If persisting fails
    /// partway, the previous session is put back.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthenticationError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthenticationError::MissingCredentials);
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let identity = match self.login_client.login(&request).await {
            Ok(identity) => identity,
            Err(err) => {
                tracing::info!(email, error = %err, "login rejected");
                return Err(err);
            }
        };

        if !identity.has_identifier() {
            return Err(AuthenticationError::MalformedReply("user has no identifier".to_string()));
        }

        let previous = self.read_raw();
        if let Err(err) = self.persist(&identity) {
            tracing::warn!(error = %err, "failed to persist session; restoring previous state");
            self.restore_raw(previous);
            self.reconcile_snapshot();
            return Err(err.into());
        }

        tracing::info!(user_id = %identity.id, role = ?identity.role_tag().map(|t| t.as_str()), "logged in");
        self.replace_snapshot(Some(identity.clone()));
        self.notify(ChangeCause::LoggedIn);
        Ok(identity)
    }

    /// Clear the persisted session. Never fails; calling it again is a no-op.
    pub fn logout(&self) {
        self.clear_persisted();
        if self.replace_snapshot(None).is_some() {
            tracing::info!("logged out");
            self.notify(ChangeCause::LoggedOut);
        }
    }

    /// Read the persisted identity.
    ///
    /// Returns `None` when either key is missing, the flag is not set, or the
    /// identity fails to parse. Corrupted entries are cleared on the spot.
    pub fn current_identity(&self) -> Option<Identity> {
        match self.read_persisted() {
            Ok(identity) => identity,
            Err(SessionStateError::CorruptedSessionState(reason)) => {
                tracing::warn!(%reason, "corrupted session state; clearing");
                self.clear_persisted();
                if self.replace_snapshot(None).is_some() {
                    self.notify(ChangeCause::SessionRepaired);
                }
                None
            }
            Err(SessionStateError::Store(err)) => {
                tracing::warn!(error = %err, "session store unreadable; treating as signed out");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_identity().is_some_and(|identity| identity.has_identifier())
    }

    /// Identity as of the last login, logout or sync.
    pub fn snapshot(&self) -> Option<Identity> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn subscribe(&self) -> AuthSubscription {
        self.listeners.subscribe()
    }

    /// Apply session changes made by other tabs.
    ///
    /// Drains pending storage notifications; if any touched a session key, the
    /// snapshot is re-resolved and subscribers are told. Returns whether that
    /// happened. Foreign writes queue until this is called.
    pub fn sync_external_changes(&self) -> bool {
        let Some(events) = self.storage_events.as_ref() else {
            return false;
        };

        let relevant = events
            .drain()
            .iter()
            .any(|event| self.config.is_session_key(&event.key));
        if !relevant {
            return false;
        }

        let resolved = self.current_identity();
        tracing::debug!(signed_in = resolved.is_some(), "session changed in another tab");
        self.replace_snapshot(resolved);
        self.notify(ChangeCause::ExternalChange);
        true
    }

    fn read_persisted(&self) -> Result<Option<Identity>, SessionStateError> {
        let flag = self.store.get(&self.config.flag_key)?;
        let blob = self.store.get(&self.config.user_key)?;

        let (Some(flag), Some(blob)) = (flag, blob) else {
            return Ok(None);
        };
        if flag != FLAG_SET {
            return Ok(None);
        }

        let identity: Identity = serde_json::from_str(&blob)
            .map_err(|e| SessionStateError::CorruptedSessionState(e.to_string()))?;
        Ok(Some(identity).filter(Identity::has_identifier))
    }

    fn persist(&self, identity: &Identity) -> Result<(), StoreError> {
        let blob = serde_json::to_string(identity).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(&self.config.user_key, &blob)?;
        self.store.set(&self.config.flag_key, FLAG_SET)
    }

    fn clear_persisted(&self) {
        for key in [&self.config.user_key, &self.config.flag_key] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key = %key, error = %err, "failed to clear session key");
            }
        }
    }

    fn read_raw(&self) -> [(String, Option<String>); 2] {
        [&self.config.user_key, &self.config.flag_key]
            .map(|key| (key.clone(), self.store.get(key).ok().flatten()))
    }

    fn restore_raw(&self, previous: [(String, Option<String>); 2]) {
        for (key, value) in previous {
            let restored = match value {
                Some(value) => self.store.set(&key, &value),
                None => self.store.remove(&key),
            };
            if let Err(err) = restored {
                tracing::warn!(key = %key, error = %err, "failed to restore session key");
            }
        }
    }

    /// Bring the snapshot back in line with storage after a failed write.
    fn reconcile_snapshot(&self) {
        let resolved = self.current_identity();
        if self.snapshot() == resolved {
            return;
        }
        let cause = match resolved {
            Some(_) => ChangeCause::SessionRepaired,
            None => ChangeCause::LoggedOut,
        };
        self.replace_snapshot(resolved);
        self.notify(cause);
    }

    fn replace_snapshot(&self, identity: Option<Identity>) -> Option<Identity> {
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, identity)
    }

    fn notify(&self, cause: ChangeCause) {
        self.listeners.publish(AuthChange {
            identity: self.snapshot(),
            cause,
            occurred_at: Utc::now(),
        });
    }
}
