use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TripId;

pub type MemberId = Uuid;

/// A participant in a trip. Members may be referenced as payer by expenses
/// and as debtor by splits; removing a member leaves those references in
/// place as historical records (the ledger tolerates the dangling ids).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub trip_id: TripId,
    pub name: String,
    pub email: Option<String>,
    /// Loose link to an external user account, if the member registered one.
    pub user_id: Option<String>,
    pub is_admin: bool,
}

impl Member {
    pub fn new(trip_id: TripId, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name,
            email: None,
            user_id: None,
            is_admin: false,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}
