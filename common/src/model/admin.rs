//! Accounts and roles as managed from the user administration page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub name: String,
}

/// Row of `GET /api/admin/users`. `roles` is the single role joined in by
/// the data API, absent for accounts without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Role>,
}

/// Body of `PUT /api/admin/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role_id: String,
}

impl ManagedUser {
    pub fn role_id(&self) -> Option<&str> {
        self.roles.as_ref().map(|r| r.id.as_str())
    }

    /// First eight characters of the id, for display.
    pub fn short_id(&self) -> String {
        let short: String = self.id.chars().take(8).collect();
        if short.len() < self.id.len() {
            format!("{}...", short)
        } else {
            short
        }
    }
}

/// Gives `user_id` the role `role_id` in the local list after the data API
/// accepted the change. Returns `false` when either id is unknown.
pub fn assign_role(users: &mut [ManagedUser], roles: &[Role], user_id: &str, role_id: &str) -> bool {
    let Some(role) = roles.iter().find(|r| r.id == role_id) else {
        return false;
    };
    match users.iter_mut().find(|u| u.id == user_id) {
        Some(user) => {
            user.roles = Some(role.clone());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<Role> {
        serde_json::from_str(r#"[{"id":1,"name":"admin"},{"id":2,"name":"technician"}]"#).unwrap()
    }

    fn users() -> Vec<ManagedUser> {
        serde_json::from_str(
            r#"[
                {"id":"6f1c2b0e-aaaa-bbbb","email":"ana@lab.org","roles":{"id":2,"name":"technician"}},
                {"id":"u2","email":null}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn users_read_joined_role() {
        let users = users();
        assert_eq!(users[0].role_id(), Some("2"));
        assert_eq!(users[1].role_id(), None);
        assert_eq!(users[0].short_id(), "6f1c2b0e...");
        assert_eq!(users[1].short_id(), "u2");
    }

    #[test]
    fn assigning_a_role_updates_only_that_user() {
        let mut users = users();
        assert!(assign_role(&mut users, &roles(), "u2", "1"));
        assert_eq!(users[1].roles.as_ref().map(|r| r.name.as_str()), Some("admin"));
        assert_eq!(users[0].role_id(), Some("2"));
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut users = users();
        assert!(!assign_role(&mut users, &roles(), "u2", "9"));
        assert!(!assign_role(&mut users, &roles(), "nobody", "1"));
        assert_eq!(users[1].role_id(), None);
    }

    #[test]
    fn role_update_body() {
        let body = serde_json::to_string(&RoleUpdate { role_id: "1".into() }).unwrap();
        assert_eq!(body, r#"{"role_id":"1"}"#);
    }
}
