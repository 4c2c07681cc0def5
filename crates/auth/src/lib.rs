//! `eara-auth`: pure role-based access control for the EARA portal.
//!
//! This crate is intentionally decoupled from storage, HTTP and routing. It
//! owns the role catalogue, the role → permission table, the route guard and
//! the dashboard resolver. Callers hand in an already-resolved [`Identity`].

pub mod authorize;
pub mod dashboard;
pub mod identity;
pub mod navigation;
pub mod permissions;
pub mod roles;

pub use authorize::{
    AccessDenial, AuthorizationExplanation, Grant, RouteDecision, authorize, check_access,
    explain_authorization,
};
pub use dashboard::{
    DELEGATION_HEAD_DASHBOARD, GENERIC_DASHBOARD, LOGIN_PATH, has_delegation_head_privileges,
    resolve_home_dashboard,
};
pub use identity::{CountryRef, Identity, SubcommitteeRef};
pub use navigation::{
    NavItem, can_access_delegation_head_dashboard, can_review_reports, delegation_head_menu,
    role_display_name,
};
pub use permissions::{PathPrefix, PermissionEntry, PermissionTable, TableError};
pub use roles::{Role, RoleTag};
