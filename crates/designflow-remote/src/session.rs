//! Session context
//!
//! An explicit object carrying the current user and their permissions,
//! created at application start and passed to the components that need
//! it. Never a module-level singleton; its lifetime is the session's.

use serde::{Deserialize, Serialize};

/// Role granted to the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

/// Action a caller may ask permission for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    EditFlow,
    ManageClients,
    UploadAssets,
}

/// The current user's session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub roles: Vec<Role>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
        }
    }

    /// Permission predicate over the granted roles
    pub fn can(&self, permission: Permission) -> bool {
        self.roles.iter().any(|role| match (role, permission) {
            (Role::Owner, _) => true,
            (Role::Editor, Permission::EditFlow) => true,
            (Role::Editor, Permission::UploadAssets) => true,
            (Role::Editor, Permission::ManageClients) => false,
            (Role::Viewer, _) => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_everything() {
        let session = Session::new("u1", vec![Role::Owner]);
        assert!(session.can(Permission::EditFlow));
        assert!(session.can(Permission::ManageClients));
        assert!(session.can(Permission::UploadAssets));
    }

    #[test]
    fn editor_cannot_manage_clients() {
        let session = Session::new("u1", vec![Role::Editor]);
        assert!(session.can(Permission::EditFlow));
        assert!(!session.can(Permission::ManageClients));
    }

    #[test]
    fn viewer_can_nothing() {
        let session = Session::new("u1", vec![Role::Viewer]);
        assert!(!session.can(Permission::EditFlow));
        assert!(!session.can(Permission::UploadAssets));
    }
}
