//! Session state and the permission predicate.
//!
//! The session is a plain value owned by the application root and passed down
//! to whatever needs it. Permission checks read the snapshot it holds; nothing
//! here reaches out to the network.

use crate::model::profile::{capability, Action, PermissionSet, UserProfile};
use crate::model::identity::ItemType;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// `true` exactly when `permissions` is loaded and contains `capability`.
pub fn has_permission(permissions: Option<&PermissionSet>, capability: &str) -> bool {
    permissions.is_some_and(|set| set.contains(capability))
}

/// The signed-in account as reported by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    user: Option<SessionUser>,
    profile: Option<UserProfile>,
    loading: bool,
}

impl Session {
    /// State before the stored credentials have been checked.
    pub fn pending() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session. `profile` is `None` when the profile fetch failed,
    /// which leaves every permission denied.
    pub fn establish(user: SessionUser, profile: Option<UserProfile>) -> Self {
        info!(
            "Session established for {} with {} permission(s)",
            user.id,
            profile.as_ref().map_or(0, |p| p.permissions.len())
        );
        Self {
            user: Some(user),
            profile,
            loading: false,
        }
    }

    /// Applies a change reported by the authentication service.
    ///
    /// The previous profile never survives a change of user; a new snapshot
    /// must be fetched and the session rebuilt with [`establish`](Self::establish).
    pub fn on_auth_state_change(&mut self, user: Option<SessionUser>) {
        let same_user = match (&self.user, &user) {
            (Some(old), Some(new)) => old.id == new.id,
            _ => false,
        };
        if !same_user {
            self.profile = None;
        }
        debug!(
            "Auth state changed: {}",
            user.as_ref().map_or("signed out", |u| u.id.as_str())
        );
        self.user = user;
        self.loading = false;
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.id);
        }
        self.profile = None;
        self.loading = false;
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.access_token.as_str())
    }

    pub fn permissions(&self) -> Option<&PermissionSet> {
        self.profile.as_ref().map(|p| &p.permissions)
    }

    pub fn can(&self, capability: &str) -> bool {
        has_permission(self.permissions(), capability)
    }

    pub fn can_act(&self, item_type: ItemType, action: Action) -> bool {
        self.can(&capability(item_type, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::capabilities::{CHEMICALS_CREATE, WASTE_DELETE};

    fn user(id: &str) -> SessionUser {
        SessionUser {
            id: id.to_string(),
            email: None,
            access_token: format!("token-{}", id),
        }
    }

    fn profile(permissions: &[&str]) -> UserProfile {
        UserProfile {
            permissions: permissions.iter().copied().collect(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn no_profile_denies_everything() {
        assert!(!has_permission(None, WASTE_DELETE));
        assert!(!has_permission(None, ""));
        assert!(!Session::anonymous().can(CHEMICALS_CREATE));
        assert!(!Session::pending().can(CHEMICALS_CREATE));
        assert!(!Session::establish(user("u1"), None).can(CHEMICALS_CREATE));
    }

    #[test]
    fn loaded_profile_grants_exactly_its_capabilities() {
        let set = PermissionSet::new([WASTE_DELETE]);
        assert!(has_permission(Some(&set), WASTE_DELETE));
        assert!(!has_permission(Some(&set), "waste:delete "));
        assert!(!has_permission(Some(&set), CHEMICALS_CREATE));
        assert!(!has_permission(Some(&PermissionSet::default()), WASTE_DELETE));
    }

    #[test]
    fn session_checks_follow_snapshot() {
        let session = Session::establish(user("u1"), Some(profile(&[CHEMICALS_CREATE])));
        assert!(session.can(CHEMICALS_CREATE));
        assert!(session.can_act(ItemType::Chemical, Action::Create));
        assert!(!session.can_act(ItemType::Chemical, Action::Delete));
        assert_eq!(session.access_token(), Some("token-u1"));
    }

    #[test]
    fn sign_out_clears_user_and_permissions() {
        let mut session = Session::establish(user("u1"), Some(profile(&[WASTE_DELETE])));
        session.sign_out();
        assert!(!session.is_signed_in());
        assert!(!session.can(WASTE_DELETE));
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn changing_user_drops_previous_snapshot() {
        let mut session = Session::establish(user("u1"), Some(profile(&[WASTE_DELETE])));

        session.on_auth_state_change(Some(user("u1")));
        assert!(session.can(WASTE_DELETE));

        session.on_auth_state_change(Some(user("u2")));
        assert!(!session.can(WASTE_DELETE));
        assert!(session.is_signed_in());

        session.on_auth_state_change(None);
        assert!(!session.is_signed_in());
        assert!(!session.can(WASTE_DELETE));
    }
}
