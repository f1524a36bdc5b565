//! Login session and the role gate derived from it.

use crate::profile::Role;
use serde::{Deserialize, Serialize};

/// The session cached at login: bearer token plus the identity facts
/// every screen reads. Written at login success, cleared at logout or
/// on a 401, read-only everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl AuthSession {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// How edits to the viewed profile are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Admin editing another user: single-field updates apply
    /// immediately, no approval artifact is created.
    DirectApply,
    /// User editing their own profile: every saved field becomes a
    /// pending update request awaiting admin review.
    RequestApproval,
}

/// View permissions for one profile, derived from the cached session.
///
/// This is an authorization-at-the-edge convenience only; the server
/// independently rejects unauthorized edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileAccess {
    pub is_admin: bool,
    pub is_self: bool,
}

impl ProfileAccess {
    /// Derives access for `viewed_user_id` from the session.
    pub fn evaluate(session: &AuthSession, viewed_user_id: &str) -> Self {
        Self {
            is_admin: session.is_admin(),
            is_self: session.user_id == viewed_user_id,
        }
    }

    pub fn is_read_only(self) -> bool {
        !self.is_admin && !self.is_self
    }

    pub fn can_edit(self) -> bool {
        self.is_admin || self.is_self
    }

    /// Edit semantics for this viewer, or None when read-only.
    pub fn edit_mode(self) -> Option<EditMode> {
        if self.is_self {
            Some(EditMode::RequestApproval)
        } else if self.is_admin {
            Some(EditMode::DirectApply)
        } else {
            None
        }
    }
}
