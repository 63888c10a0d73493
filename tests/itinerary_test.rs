mod common;

use anyhow::Result;
use common::{SampleTrip, date, test_service};
use tripledger::application::{ActivityPatch, AppError, DriverPatch, HotelPatch};
use tripledger::domain::BookingStatus;
use uuid::Uuid;

#[tokio::test]
async fn test_activity_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;

    let activity = service
        .add_activity(
            fixture.trip.id,
            "Surf lesson".to_string(),
            "Carcavelos".to_string(),
            date("2026-07-13"),
            Some("09:00".to_string()),
            None,
            Some(3500),
        )
        .await?;

    let activities = service.list_activities(fixture.trip.id).await?;
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].title, "Surf lesson");
    assert_eq!(activities[0].cost_cents, Some(3500));
    assert_eq!(activities[0].time.as_deref(), Some("09:00"));

    service.delete_activity(activity.id).await?;
    assert!(service.list_activities(fixture.trip.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_activity_update_patches_fields() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;

    let activity = service
        .add_activity(
            fixture.trip.id,
            "Surf lesson".to_string(),
            "Carcavelos".to_string(),
            date("2026-07-13"),
            Some("09:00".to_string()),
            None,
            Some(3500),
        )
        .await?;

    let updated = service
        .update_activity(
            activity.id,
            ActivityPatch {
                title: Some("Surf lesson (advanced)".to_string()),
                cost_cents: Some(4200),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "Surf lesson (advanced)");
    assert_eq!(updated.cost_cents, Some(4200));
    // Untouched fields survive the patch
    assert_eq!(updated.location, "Carcavelos");
    assert_eq!(updated.time.as_deref(), Some("09:00"));

    let loaded = service.get_activity(activity.id).await?;
    assert_eq!(loaded.title, "Surf lesson (advanced)");
    assert_eq!(loaded.cost_cents, Some(4200));

    assert!(matches!(
        service
            .update_activity(Uuid::new_v4(), ActivityPatch::default())
            .await,
        Err(AppError::ActivityNotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_driver_booking_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;

    let driver = service
        .hire_driver(
            fixture.trip.id,
            "Marco".to_string(),
            "+351 555 0101".to_string(),
            "van".to_string(),
            "Airport".to_string(),
            "Hotel Central".to_string(),
            date("2026-07-10"),
            Some("11:30".to_string()),
            8000,
        )
        .await?;
    assert_eq!(driver.status, BookingStatus::Pending);

    let confirmed = service
        .update_driver(
            driver.id,
            DriverPatch {
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let drivers = service.list_drivers(fixture.trip.id).await?;
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].status, BookingStatus::Confirmed);

    service.cancel_driver(driver.id).await?;
    assert!(service.list_drivers(fixture.trip.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_hotel_booking_lifecycle() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;

    let hotel = service
        .book_hotel(
            fixture.trip.id,
            "Hotel Central".to_string(),
            "Lisbon".to_string(),
            date("2026-07-10"),
            date("2026-07-17"),
            "double".to_string(),
            2,
            98000,
        )
        .await?;
    assert_eq!(hotel.status, BookingStatus::Pending);

    let updated = service
        .update_hotel(
            hotel.id,
            HotelPatch {
                guests: Some(3),
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.guests, 3);
    assert_eq!(updated.status, BookingStatus::Confirmed);

    service.cancel_hotel(hotel.id).await?;
    assert!(service.list_hotels(fixture.trip.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_bookings_require_existing_trip() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let missing = Uuid::new_v4();
    let result = service
        .add_activity(
            missing,
            "Surf lesson".to_string(),
            "Carcavelos".to_string(),
            date("2026-07-13"),
            None,
            None,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::TripNotFound(_))));

    Ok(())
}
