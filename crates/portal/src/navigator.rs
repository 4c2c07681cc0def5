//! Navigation dispatch: path in, page or redirect out.

use serde::Serialize;
use thiserror::Error;

use eara_auth::{
    GENERIC_DASHBOARD, Identity, LOGIN_PATH, PermissionTable, RouteDecision, authorize,
    resolve_home_dashboard,
};

use crate::routes::{Page, match_route, normalize_path};

/// Redirect chains longer than this are treated as loops.
const MAX_REDIRECTS: usize = 4;

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Navigation {
    Render { page: Page, path: String },
    Redirect { to: String },
}

impl Navigation {
    fn render(page: Page, path: impl Into<String>) -> Self {
        Self::Render {
            page,
            path: path.into(),
        }
    }

    fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect { to: to.into() }
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Self::Render { page, .. } => Some(*page),
            Self::Redirect { .. } => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { to } => Some(to),
            Self::Render { .. } => None,
        }
    }
}

/// Final page after following redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settled {
    pub page: Page,
    pub path: String,
    /// Every redirect target visited, in order.
    pub redirects: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect loop: {}", .0.join(" -> "))]
    RedirectLoop(Vec<String>),
}

/// Stateless dispatcher over a permission table.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'t> {
    table: &'t PermissionTable,
}

impl Navigator<'static> {
    /// Navigator over the process-wide standard table.
    pub fn standard() -> Self {
        Self::new(PermissionTable::global())
    }
}

impl<'t> Navigator<'t> {
    pub fn new(table: &'t PermissionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t PermissionTable {
        self.table
    }

    /// Decide what `path` shows for `identity`.
    pub fn navigate(&self, identity: Option<&Identity>, path: &str) -> Navigation {
        let path = normalize_path(path);
        let identity = identity.filter(|i| i.has_identifier());

        if path == LOGIN_PATH {
            return match identity {
                Some(_) => Navigation::redirect(GENERIC_DASHBOARD),
                None => Navigation::render(Page::Login, path),
            };
        }

        let Some(identity) = identity else {
            tracing::debug!(%path, "not signed in; redirecting to login");
            return Navigation::redirect(LOGIN_PATH);
        };

        if path == "/" {
            return Navigation::redirect(GENERIC_DASHBOARD);
        }

        let Some(hit) = match_route(&path) else {
            return self.landing(identity, path);
        };

        match authorize(Some(identity), self.table, hit.route.required) {
            RouteDecision::Allow => Navigation::render(hit.route.page, path),
            RouteDecision::DenyToLogin => Navigation::redirect(LOGIN_PATH),
            RouteDecision::DenyToHome(home) => Navigation::redirect(home.as_str()),
        }
    }

    /// Follow redirects until a page renders.
    pub fn settle(&self, identity: Option<&Identity>, path: &str) -> Result<Settled, NavigationError> {
        let mut redirects = Vec::new();
        let mut current = path.to_string();

        loop {
            match self.navigate(identity, &current) {
                Navigation::Render { page, path } => {
                    return Ok(Settled {
                        page,
                        path,
                        redirects,
                    });
                }
                Navigation::Redirect { to } => {
                    if redirects.len() >= MAX_REDIRECTS {
                        redirects.push(to);
                        return Err(NavigationError::RedirectLoop(redirects));
                    }
                    redirects.push(to.clone());
                    current = to;
                }
            }
        }
    }

    /// `/dashboard` and unmatched paths land on the viewer's home.
    fn landing(&self, identity: &Identity, path: String) -> Navigation {
        let home = resolve_home_dashboard(identity, self.table);
        if home == GENERIC_DASHBOARD {
            Navigation::render(Page::GenericDashboard, path)
        } else {
            Navigation::redirect(home.as_str())
        }
    }
}

impl Default for Navigator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
