use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, TripId};

pub type ActivityId = Uuid;
pub type DriverId = Uuid;
pub type HotelId = Uuid;

/// Lifecycle of a driver or hotel booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A planned activity on the trip itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub trip_id: TripId,
    pub title: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub description: Option<String>,
    pub cost_cents: Option<Cents>,
}

impl Activity {
    pub fn new(trip_id: TripId, title: String, location: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            title,
            location,
            date,
            time: None,
            description: None,
            cost_cents: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cost(mut self, cost_cents: Cents) -> Self {
        self.cost_cents = Some(cost_cents);
        self
    }
}

/// A hired driver for a leg of the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DriverId,
    pub trip_id: TripId,
    pub name: String,
    pub contact: String,
    pub vehicle_type: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub cost_cents: Cents,
    pub status: BookingStatus,
}

impl Driver {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trip_id: TripId,
        name: String,
        contact: String,
        vehicle_type: String,
        pickup_location: String,
        dropoff_location: String,
        date: NaiveDate,
        cost_cents: Cents,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name,
            contact,
            vehicle_type,
            pickup_location,
            dropoff_location,
            date,
            time: None,
            cost_cents,
            status: BookingStatus::default(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// A hotel booking for the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    pub trip_id: TripId,
    pub name: String,
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
    pub guests: i64,
    pub cost_cents: Cents,
    pub status: BookingStatus,
}

impl Hotel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trip_id: TripId,
        name: String,
        location: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: String,
        guests: i64,
        cost_cents: Cents,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name,
            location,
            check_in,
            check_out,
            room_type,
            guests,
            cost_cents,
            status: BookingStatus::default(),
        }
    }
}
