use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

/// Account role. An account may hold several; exactly one is active
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Owner,
    Admin,
}

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Every role assigned to the account, active one included.
    pub roles: Vec<Role>,
    /// The role the session currently acts as.
    pub active_role: Role,
    pub email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether `role` is assigned to this account.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the account can switch roles at all.
    pub fn is_multi_role(&self) -> bool {
        self.roles.len() >= 2
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_and_displays_lowercase() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!(Role::Client.to_string(), "client");
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn multi_role_requires_at_least_two_roles() {
        let mut user = User {
            id: "u1".into(),
            name: "Avery".into(),
            email: "avery@example.com".into(),
            roles: vec![Role::Client],
            active_role: Role::Client,
            email_verified: true,
            created_at: None,
        };
        assert!(!user.is_multi_role());

        user.roles.push(Role::Owner);
        assert!(user.is_multi_role());
        assert!(user.has_role(Role::Owner));
        assert!(!user.has_role(Role::Admin));
    }
}
