//! Role presentation helpers shared by the portal's menus.

use serde::Serialize;

use crate::{Identity, PathPrefix, Role, has_delegation_head_privileges};

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: PathPrefix,
    pub icon: Option<&'static str>,
}

impl NavItem {
    pub const fn new(id: &'static str, label: &'static str, path: &'static str) -> Self {
        Self {
            id,
            label,
            path: PathPrefix::from_static(path),
            icon: None,
        }
    }

    pub const fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Human-readable role name, taking delegation-head privileges into account.
pub fn role_display_name(identity: &Identity) -> String {
    if has_delegation_head_privileges(identity) {
        return "Head of Delegation".to_string();
    }

    let Some(tag) = identity.role_tag() else {
        return "Unknown".to_string();
    };

    let name = match tag.role() {
        Some(Role::Admin) => "Administrator",
        Some(Role::Secretary) => "Secretary",
        Some(Role::Chair) => "Chair",
        Some(Role::ViceChair) => "Vice Chair",
        Some(Role::Hod) => "Head of Delegation",
        Some(Role::CommissionerGeneral) => "Commissioner General",
        Some(Role::SubcommitteeMember) => "Subcommittee Member",
        Some(Role::CommitteeMember) => "Committee Member",
        Some(Role::CommitteeSecretary) => "Committee Secretary",
        Some(Role::DelegationSecretary) => "Delegation Secretary",
        None => tag.as_str(),
    };
    name.to_string()
}

pub fn can_review_reports(identity: &Identity) -> bool {
    has_delegation_head_privileges(identity)
}

pub fn can_access_delegation_head_dashboard(identity: &Identity) -> bool {
    has_delegation_head_privileges(identity)
}

const DELEGATION_HEAD_ITEMS: [NavItem; 5] = [
    NavItem::new("overview", "Dashboard Overview", "/hod/dashboard").with_icon("home"),
    NavItem::new("reports", "Report Review", "/hod/reports").with_icon("document"),
    NavItem::new("performance", "Performance Analytics", "/hod/performance").with_icon("chart"),
    NavItem::new("notifications", "Notifications", "/hod/notifications").with_icon("bell"),
    NavItem::new("profile", "Profile Settings", "/hod/profile").with_icon("user"),
];

/// Sections of the delegation-head dashboard; empty without the privilege.
pub fn delegation_head_menu(identity: &Identity) -> Vec<NavItem> {
    if !has_delegation_head_privileges(identity) {
        return Vec::new();
    }
    DELEGATION_HEAD_ITEMS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_follow_delegation_head_privilege() {
        let cases = [
            (Identity::new(1, "CHAIR").with_subcommittee(1, "Head Of Delegation"), "Head of Delegation"),
            (Identity::new(2, "VICE_CHAIR").with_subcommittee(1, "Head Of Delegation"), "Head of Delegation"),
            (Identity::new(3, "CHAIR").with_subcommittee(2, "IT Sub Committee"), "Chair"),
            (Identity::new(4, "HOD"), "Head of Delegation"),
            (Identity::new(5, "SECRETARY"), "Secretary"),
            (Identity::new(6, "CHAIR"), "Chair"),
            (Identity::new(7, "SOMETHING_NEW"), "SOMETHING_NEW"),
        ];
        for (identity, expected) in cases {
            assert_eq!(role_display_name(&identity), expected);
        }

        let mut missing = Identity::new(8, "ADMIN");
        missing.role = None;
        assert_eq!(role_display_name(&missing), "Unknown");
    }

    #[test]
    fn delegation_head_menu_only_for_delegation_heads() {
        let head = Identity::new(1, "CHAIR").with_subcommittee(1, "head of delegation");
        let menu = delegation_head_menu(&head);
        assert_eq!(menu.len(), 5);
        assert_eq!(menu[0].path, "/hod/dashboard");
        assert!(can_review_reports(&head));
        assert!(can_access_delegation_head_dashboard(&head));

        let legacy = Identity::new(4, "HOD");
        assert!(delegation_head_menu(&legacy).is_empty());
        assert!(!can_review_reports(&legacy));
    }
}
