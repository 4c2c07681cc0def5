//! `eara-portal`: route dispatch for the EARA dashboard.
//!
//! Maps concrete paths onto pages, runs the route guard, and resolves the
//! generic landing path. The [`Portal`] facade wires this to the
//! authentication state holder the way the single-page app shell does.

pub mod app;
pub mod menu;
pub mod navigator;
pub mod routes;

pub use app::Portal;
pub use menu::sidebar_menu;
pub use navigator::{Navigation, NavigationError, Navigator, Settled};
pub use routes::{Page, ROUTES, RouteDef, RouteMatch, match_route, normalize_path};
