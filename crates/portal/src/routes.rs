//! Static route table.

use std::collections::BTreeMap;

use serde::Serialize;

use eara_auth::PathPrefix;

/// Every page the shell can render.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Login,
    GenericDashboard,
    AdminDashboard,
    SecretaryDashboard,
    ChairDashboard,
    DelegationHeadDashboard,
    CommissionerDashboard,
    MemberDashboard,
    EaraPerformanceDashboard,
    SimplePerformanceDashboard,
    CommitteeList,
    CommitteeForm,
    CountryList,
    CountryForm,
    MemberList,
    MemberForm,
    SubcommitteeMemberList,
    SubcommitteeMemberForm,
    SubcommitteeMemberView,
    CreateMeeting,
    ArchiveMeetings,
    InvitationList,
    SendInvitations,
    InvitationManager,
    MeetingInvitationManager,
    ResolutionWorkflow,
    SecretaryQuickTest,
    TakeMinutes,
    Notifications,
    UserProfile,
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    pub page: Page,
    /// Prefixes of which the viewer must hold at least one; empty = any
    /// signed-in user with a recognized role.
    pub required: &'static [PathPrefix],
}

const fn route(pattern: &'static str, page: Page, required: &'static [PathPrefix]) -> RouteDef {
    RouteDef {
        pattern,
        page,
        required,
    }
}

const ANY: &[PathPrefix] = &[];
const ADMIN_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/admin/dashboard")];
const SECRETARY_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/secretary/dashboard")];
const CHAIR_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/chair/dashboard")];
const HOD_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/hod/dashboard")];
const COMMISSIONER_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/commissioner/dashboard")];
const MEMBER_DASHBOARD: &[PathPrefix] = &[PathPrefix::from_static("/member/dashboard")];
const EARA_PERFORMANCE: &[PathPrefix] = &[PathPrefix::from_static("/eara-performance-dashboard")];
const COMMITTEES: &[PathPrefix] = &[PathPrefix::from_static("/committees")];
const COUNTRIES: &[PathPrefix] = &[PathPrefix::from_static("/countries")];
const MEMBERS: &[PathPrefix] = &[PathPrefix::from_static("/members")];
const SUBCOMMITTEE_MEMBERS: &[PathPrefix] = &[PathPrefix::from_static("/sub-committee-members")];
const MEETINGS: &[PathPrefix] = &[PathPrefix::from_static("/meetings")];
const INVITATIONS: &[PathPrefix] = &[PathPrefix::from_static("/invitations")];
const RESOLUTIONS: &[PathPrefix] = &[PathPrefix::from_static("/resolutions")];
const MINUTES: &[PathPrefix] = &[PathPrefix::from_static("/minutes")];
const NOTIFICATIONS: &[PathPrefix] = &[PathPrefix::from_static("/notifications")];

/// Protected in-app routes. `/login`, `/` and `/dashboard` are handled by the
/// navigator itself. First match wins, so literal segments precede `:id`.
pub static ROUTES: &[RouteDef] = &[
    route("/admin/dashboard", Page::AdminDashboard, ADMIN_DASHBOARD),
    route("/secretary/dashboard", Page::SecretaryDashboard, SECRETARY_DASHBOARD),
    route("/chair/dashboard", Page::ChairDashboard, CHAIR_DASHBOARD),
    route("/hod/dashboard", Page::DelegationHeadDashboard, HOD_DASHBOARD),
    route("/commissioner/dashboard", Page::CommissionerDashboard, COMMISSIONER_DASHBOARD),
    route("/member/dashboard", Page::MemberDashboard, MEMBER_DASHBOARD),
    // No role currently grants this page.
    route("/eara-performance-dashboard", Page::EaraPerformanceDashboard, EARA_PERFORMANCE),
    route("/simple-performance-dashboard", Page::SimplePerformanceDashboard, ANY),
    route("/committees", Page::CommitteeList, COMMITTEES),
    route("/committees/new", Page::CommitteeForm, COMMITTEES),
    route("/committees/:id/edit", Page::CommitteeForm, COMMITTEES),
    route("/countries", Page::CountryList, COUNTRIES),
    route("/countries/new", Page::CountryForm, COUNTRIES),
    route("/countries/:id/edit", Page::CountryForm, COUNTRIES),
    route("/members", Page::MemberList, MEMBERS),
    route("/members/new", Page::MemberForm, MEMBERS),
    route("/members/:id/edit", Page::MemberForm, MEMBERS),
    route("/sub-committee-members", Page::SubcommitteeMemberList, SUBCOMMITTEE_MEMBERS),
    route("/sub-committee-members/new", Page::SubcommitteeMemberForm, SUBCOMMITTEE_MEMBERS),
    route("/sub-committee-members/:id/edit", Page::SubcommitteeMemberForm, SUBCOMMITTEE_MEMBERS),
    route("/sub-committee-members/:id", Page::SubcommitteeMemberView, SUBCOMMITTEE_MEMBERS),
    route("/meetings/create", Page::CreateMeeting, MEETINGS),
    route("/meetings/archive", Page::ArchiveMeetings, MEETINGS),
    route("/invitations", Page::InvitationList, INVITATIONS),
    route("/invitations/send", Page::SendInvitations, INVITATIONS),
    route("/invitations/send/original", Page::SendInvitations, INVITATIONS),
    route("/invitations/manage", Page::InvitationManager, INVITATIONS),
    route("/profile", Page::UserProfile, ANY),
    route("/secretary/meeting-invitations", Page::MeetingInvitationManager, SECRETARY_DASHBOARD),
    route("/secretary/resolution-assignment", Page::ResolutionWorkflow, SECRETARY_DASHBOARD),
    route("/meeting-invitations/enhanced", Page::MeetingInvitationManager, INVITATIONS),
    route("/resolutions/enhanced", Page::ResolutionWorkflow, RESOLUTIONS),
    route("/secretary/quick-test", Page::SecretaryQuickTest, SECRETARY_DASHBOARD),
    route("/minutes/take", Page::TakeMinutes, MINUTES),
    route("/notifications", Page::Notifications, NOTIFICATIONS),
];

/// A route table hit.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub params: BTreeMap<&'static str, String>,
}

/// Canonical form of a path: no query/fragment, leading `/`, no trailing `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

/// Find the first route whose pattern matches `path`.
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = normalize_path(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ROUTES.iter().find_map(|route| {
        let pattern: Vec<&'static str> = route.pattern.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(&segments) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name, (*actual).to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(RouteMatch { route, params })
    })
}
