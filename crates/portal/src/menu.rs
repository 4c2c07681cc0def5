//! Sidebar links per role.

use eara_auth::{Identity, NavItem, Role};

use crate::navigator::{Navigation, Navigator};

const PROFILE: NavItem = NavItem::new("profile", "My Profile", "/profile").with_icon("user");
const PERFORMANCE: NavItem =
    NavItem::new("performance", "Simple Performance Dashboard", "/simple-performance-dashboard").with_icon("chart");
const NOTIFICATIONS: NavItem = NavItem::new("notifications", "Notifications", "/notifications").with_icon("bell");
const ARCHIVE: NavItem = NavItem::new("archive", "Archive Meetings", "/meetings/archive").with_icon("archive");
const COUNTRIES: NavItem = NavItem::new("countries", "Countries", "/countries").with_icon("globe");
const COMMITTEES: NavItem = NavItem::new("committees", "Committees", "/committees").with_icon("users");
const CREATE_MEETING: NavItem = NavItem::new("create-meeting", "Create Meeting", "/meetings/create").with_icon("calendar");
const TAKE_MINUTES: NavItem = NavItem::new("take-minutes", "Take Minutes", "/minutes/take").with_icon("document");
const MEMBERS: NavItem = NavItem::new("members", "Committee Members", "/members");
const SUBCOMMITTEE_MEMBERS: NavItem = NavItem::new("sub-committee-members", "Sub-Committee Members", "/sub-committee-members");

const MEMBER_ITEMS: &[NavItem] = &[PROFILE, PERFORMANCE, NOTIFICATIONS, ARCHIVE, COUNTRIES, COMMITTEES];
const SECRETARY_ITEMS: &[NavItem] = &[
    PROFILE,
    PERFORMANCE,
    ARCHIVE,
    COMMITTEES,
    COUNTRIES,
    CREATE_MEETING,
    TAKE_MINUTES,
];
const OVERSIGHT_ITEMS: &[NavItem] = &[PROFILE, PERFORMANCE, ARCHIVE, COUNTRIES, COMMITTEES];
const ADMIN_ITEMS: &[NavItem] = &[
    PROFILE,
    PERFORMANCE,
    COMMITTEES,
    COUNTRIES,
    MEMBERS,
    SUBCOMMITTEE_MEMBERS,
];
const FALLBACK_ITEMS: &[NavItem] = &[PROFILE, PERFORMANCE];

fn candidates(role: Option<Role>) -> &'static [NavItem] {
    match role {
        Some(Role::SubcommitteeMember | Role::CommitteeMember) => MEMBER_ITEMS,
        Some(Role::Secretary | Role::CommitteeSecretary | Role::DelegationSecretary) => SECRETARY_ITEMS,
        Some(Role::Chair | Role::ViceChair | Role::Hod | Role::CommissionerGeneral) => OVERSIGHT_ITEMS,
        Some(Role::Admin) => ADMIN_ITEMS,
        None => FALLBACK_ITEMS,
    }
}

/// Sidebar links for `identity`, minus any the route guard would bounce.
pub fn sidebar_menu(identity: &Identity, navigator: &Navigator<'_>) -> Vec<NavItem> {
    candidates(identity.known_role())
        .iter()
        .filter(|item| {
            matches!(
                navigator.navigate(Some(identity), item.path.as_str()),
                Navigation::Render { .. }
            )
        })
        .cloned()
        .collect()
}
