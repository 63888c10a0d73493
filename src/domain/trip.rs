use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TripId = Uuid;

/// A trip owns its members, expenses, activities, drivers and hotels.
/// Deleting a trip removes all of them; the owned collections hold plain
/// identifier cross-references rather than object graphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    /// Loose reference to an external user account, if any. Authentication
    /// lives outside this crate; the id is carried through untouched.
    pub owner_id: Option<String>,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_cents: Cents,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(
        name: String,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget_cents: Cents,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: None,
            name,
            destination,
            start_date,
            end_date,
            budget_cents,
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
