//! `eara-session`: the authentication state holder.
//!
//! **Responsibility:** own the single source of truth for "who is logged in".
//!
//! This crate provides:
//! - A synchronous key-value [`SessionStore`] abstraction (in-memory with
//!   cross-tab notifications, or a JSON file)
//! - The [`LoginClient`] collaborator and its reqwest-backed implementation
//! - [`AuthStateHolder`], the only writer of the persisted session
//!
//! Everything else receives an [`eara_auth::Identity`] by parameter.

pub mod config;
pub mod error;
pub mod file_store;
pub mod holder;
pub mod login;
pub mod notify;
pub mod store;

pub use config::SessionConfig;
pub use error::{AuthenticationError, SessionStateError, StoreError};
pub use file_store::JsonFileSessionStore;
pub use holder::{AuthChange, AuthStateHolder, AuthSubscription, ChangeCause};
pub use login::{HttpLoginClient, InMemoryLoginClient, LoginClient, LoginReply, LoginRequest, interpret_login_reply};
pub use notify::{Broadcaster, Subscription};
pub use store::{InMemorySessionStore, SessionStore, StorageEvent, StorageSubscription, TabId};
