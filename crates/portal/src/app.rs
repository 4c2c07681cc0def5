//! The portal shell: session state plus dispatch.

use eara_auth::{Identity, LOGIN_PATH, NavItem, delegation_head_menu, resolve_home_dashboard};
use eara_session::{AuthStateHolder, AuthSubscription, AuthenticationError, LoginClient, SessionStore};

use crate::menu::sidebar_menu;
use crate::navigator::{Navigation, Navigator};

/// One browser tab's view of the portal.
#[derive(Debug)]
pub struct Portal<S, L>
where
    S: SessionStore,
    L: LoginClient,
{
    holder: AuthStateHolder<S, L>,
    navigator: Navigator<'static>,
}

impl<S, L> Portal<S, L>
where
    S: SessionStore,
    L: LoginClient,
{
    pub fn new(holder: AuthStateHolder<S, L>) -> Self {
        Self::with_navigator(holder, Navigator::standard())
    }

    pub fn with_navigator(holder: AuthStateHolder<S, L>, navigator: Navigator<'static>) -> Self {
        Self { holder, navigator }
    }

    pub fn holder(&self) -> &AuthStateHolder<S, L> {
        &self.holder
    }

    pub fn navigator(&self) -> &Navigator<'static> {
        &self.navigator
    }

    pub fn identity(&self) -> Option<Identity> {
        self.holder.snapshot()
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let identity = self.holder.snapshot();
        self.navigator.navigate(identity.as_ref(), path)
    }

    /// Sign in and send the user to their own dashboard.
    pub async fn login(&self, email: &str, password: &str) -> Result<Navigation, AuthenticationError> {
        let identity = self.holder.login(email, password).await?;
        let home = resolve_home_dashboard(&identity, self.navigator.table());
        Ok(Navigation::Redirect {
            to: home.as_str().to_string(),
        })
    }

    pub fn logout(&self) -> Navigation {
        self.holder.logout();
        Navigation::Redirect {
            to: LOGIN_PATH.to_string(),
        }
    }

    /// Pick up logins and logouts from other tabs.
    ///
    /// Returns the redirect to follow when this tab was signed out.
    pub fn sync(&self) -> Option<Navigation> {
        if !self.holder.sync_external_changes() {
            return None;
        }
        match self.holder.snapshot() {
            Some(_) => None,
            None => Some(Navigation::Redirect {
                to: LOGIN_PATH.to_string(),
            }),
        }
    }

    pub fn subscribe(&self) -> AuthSubscription {
        self.holder.subscribe()
    }

    pub fn sidebar(&self) -> Vec<NavItem> {
        self.holder
            .snapshot()
            .map(|identity| sidebar_menu(&identity, &self.navigator))
            .unwrap_or_default()
    }

    pub fn delegation_head_menu(&self) -> Vec<NavItem> {
        self.holder
            .snapshot()
            .map(|identity| delegation_head_menu(&identity))
            .unwrap_or_default()
    }
}
