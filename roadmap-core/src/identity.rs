//! Viewer identity passed explicitly into listing and aggregation queries.

use serde::{Deserialize, Serialize};

/// The signed-in identity making a query, supplied by the session layer.
/// Queries take this as an explicit parameter; there is no ambient
/// "current user" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerIdentity {
    pub email: String,
    pub is_admin: bool,
    pub is_site_editor: bool,
}

impl ViewerIdentity {
    /// An ordinary signed-in user.
    pub fn user(email: &str) -> Self {
        Self {
            email: email.to_string(),
            is_admin: false,
            is_site_editor: false,
        }
    }

    /// A site administrator.
    pub fn admin(email: &str) -> Self {
        Self {
            email: email.to_string(),
            is_admin: true,
            is_site_editor: false,
        }
    }

    /// Whether this viewer holds elevated standing.
    pub fn is_elevated(&self) -> bool {
        self.is_admin || self.is_site_editor
    }
}
