mod common;

use anyhow::Result;
use common::{SampleTrip, date, test_service};
use tripledger::application::{AppError, ExpensePatch, NewExpense};
use tripledger::domain::Cents;
use uuid::Uuid;

fn new_expense(paid_by: Uuid, amount_cents: Cents, split_among: Vec<Uuid>) -> NewExpense {
    NewExpense {
        description: "Dinner".to_string(),
        amount_cents,
        category: "food".to_string(),
        paid_by,
        date: date("2026-07-12"),
        split_method: None,
        split_among,
    }
}

#[tokio::test]
async fn test_even_split_creates_equal_shares() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let amounts: Vec<Cents> = expense.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, vec![3000, 3000, 3000]);

    Ok(())
}

#[tokio::test]
async fn test_inexact_split_sums_exactly() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    // 100.00 does not divide evenly by 3; the first debtor takes the extra cent
    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 10000, ids.clone()))
        .await?;

    let amounts: Vec<Cents> = expense.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, vec![3334, 3333, 3333]);
    assert_eq!(amounts.iter().sum::<Cents>(), 10000);

    Ok(())
}

#[tokio::test]
async fn test_split_preserves_debtor_order() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let reversed: Vec<Uuid> = ids.iter().rev().copied().collect();
    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 10000, reversed.clone()))
        .await?;

    // Round-trip through the store and check the order survived
    let loaded = service.get_expense(expense.id).await?;
    let debtors: Vec<Uuid> = loaded.splits.iter().map(|s| s.member_id).collect();
    assert_eq!(debtors, reversed);
    assert_eq!(loaded.splits[0].amount_cents, 3334);

    Ok(())
}

#[tokio::test]
async fn test_expense_without_debtors_has_no_splits() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 4200, Vec::new()))
        .await?;

    assert!(expense.splits.is_empty());
    let loaded = service.get_expense(expense.id).await?;
    assert!(loaded.splits.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unknown_payer_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;

    let stranger = Uuid::new_v4();
    let result = service
        .create_expense(fixture.trip.id, new_expense(stranger, 9000, Vec::new()))
        .await;

    assert!(matches!(result, Err(AppError::UnknownMember { .. })));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_debtors_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let result = service
        .create_expense(
            fixture.trip.id,
            new_expense(ids[0], 9000, vec![ids[0], ids[1], ids[0]]),
        )
        .await;

    assert!(matches!(result, Err(AppError::InvalidSplit(_))));

    Ok(())
}

#[tokio::test]
async fn test_negative_amount_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let result = service
        .create_expense(fixture.trip.id, new_expense(ids[0], -100, ids.clone()))
        .await;

    assert!(matches!(result, Err(AppError::InvalidSplit(_))));

    Ok(())
}

#[tokio::test]
async fn test_amount_update_redistributes_over_same_debtors() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let updated = service
        .update_expense(
            expense.id,
            ExpensePatch {
                amount_cents: Some(12000),
                ..Default::default()
            },
        )
        .await?;

    let amounts: Vec<Cents> = updated.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, vec![4000, 4000, 4000]);
    // Same debtors, same order
    let debtors: Vec<Uuid> = updated.splits.iter().map(|s| s.member_id).collect();
    assert_eq!(debtors, ids);

    Ok(())
}

#[tokio::test]
async fn test_update_with_new_debtor_set_replaces_splits() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let updated = service
        .update_expense(
            expense.id,
            ExpensePatch {
                amount_cents: Some(10000),
                split_among: Some(vec![ids[1], ids[2]]),
                ..Default::default()
            },
        )
        .await?;

    let amounts: Vec<Cents> = updated.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, vec![5000, 5000]);
    let debtors: Vec<Uuid> = updated.splits.iter().map(|s| s.member_id).collect();
    assert_eq!(debtors, vec![ids[1], ids[2]]);

    Ok(())
}

#[tokio::test]
async fn test_debtor_set_update_without_amount_recomputes() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let updated = service
        .update_expense(
            expense.id,
            ExpensePatch {
                split_among: Some(vec![ids[0], ids[1]]),
                ..Default::default()
            },
        )
        .await?;

    let amounts: Vec<Cents> = updated.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, vec![4500, 4500]);

    Ok(())
}

#[tokio::test]
async fn test_update_with_empty_debtor_set_clears_splits() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let updated = service
        .update_expense(
            expense.id,
            ExpensePatch {
                amount_cents: Some(9000),
                split_among: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await?;

    assert!(updated.splits.is_empty());
    let loaded = service.get_expense(expense.id).await?;
    assert!(loaded.splits.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_field_update_leaves_splits_untouched() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 10000, ids.clone()))
        .await?;
    let original_amounts: Vec<Cents> = expense.splits.iter().map(|s| s.amount_cents).collect();

    let updated = service
        .update_expense(
            expense.id,
            ExpensePatch {
                description: Some("Dinner at the pier".to_string()),
                category: Some("dining".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.description, "Dinner at the pier");
    assert_eq!(updated.category, "dining");
    let amounts: Vec<Cents> = updated.splits.iter().map(|s| s.amount_cents).collect();
    assert_eq!(amounts, original_amounts);

    Ok(())
}

#[tokio::test]
async fn test_update_payer_must_be_member() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 9000, ids.clone()))
        .await?;

    let result = service
        .update_expense(
            expense.id,
            ExpensePatch {
                paid_by: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::UnknownMember { .. })));

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_expense_and_splits() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let fixture = SampleTrip::create(&service).await?;
    let ids = fixture.member_ids();

    let expense = service
        .create_expense(fixture.trip.id, new_expense(ids[0], 10000, ids.clone()))
        .await?;

    service.delete_expense(expense.id).await?;

    assert!(matches!(
        service.get_expense(expense.id).await,
        Err(AppError::ExpenseNotFound(_))
    ));
    assert!(service.list_expenses(fixture.trip.id).await?.is_empty());

    // Balances no longer see the deleted expense
    let report = service.trip_balances(fixture.trip.id).await?;
    assert!(report.entries.iter().all(|e| e.balance == 0));

    Ok(())
}

#[tokio::test]
async fn test_missing_expense_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SampleTrip::create(&service).await?;

    let missing = Uuid::new_v4();
    assert!(matches!(
        service.update_expense(missing, ExpensePatch::default()).await,
        Err(AppError::ExpenseNotFound(_))
    ));
    assert!(matches!(
        service.delete_expense(missing).await,
        Err(AppError::ExpenseNotFound(_))
    ));

    Ok(())
}
