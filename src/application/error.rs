use thiserror::Error;

use crate::domain::{MemberId, SplitError, TripId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Member {member_id} does not belong to trip {trip_id}")]
    UnknownMember {
        member_id: MemberId,
        trip_id: TripId,
    },

    #[error("Invalid split: {0}")]
    InvalidSplit(#[from] SplitError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
