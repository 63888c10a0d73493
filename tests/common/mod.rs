// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use tempfile::TempDir;
use tripledger::application::TripService;
use tripledger::domain::{Member, Trip};

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(TripService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = TripService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a trip with three members (Ana is the admin)
pub struct SampleTrip {
    pub trip: Trip,
    pub members: Vec<Member>,
}

impl SampleTrip {
    pub async fn create(service: &TripService) -> Result<Self> {
        let trip = service
            .create_trip(
                "Lisbon getaway".to_string(),
                "Lisbon".to_string(),
                date("2026-07-10"),
                date("2026-07-17"),
                150000,
                None,
                None,
            )
            .await?;

        let mut members = Vec::new();
        for (name, admin) in [("Ana", true), ("Ben", false), ("Cleo", false)] {
            let member = service
                .add_member(trip.id, name.to_string(), None, None, admin)
                .await?;
            members.push(member);
        }

        Ok(Self { trip, members })
    }

    pub fn member_ids(&self) -> Vec<uuid::Uuid> {
        self.members.iter().map(|m| m.id).collect()
    }
}
