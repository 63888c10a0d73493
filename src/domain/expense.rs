use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, MemberId, SplitError, SplitMethod, TripId, equal_split};

pub type ExpenseId = Uuid;
pub type ExpenseSplitId = Uuid;

/// A shared expense paid by one member on behalf of some set of debtors.
///
/// The expense owns its splits: they are created, replaced and deleted
/// together with it, and whenever splits exist their amounts sum exactly to
/// `amount_cents`. An empty split list means the payer absorbed the whole
/// cost and the expense is balance-neutral for everyone else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub trip_id: TripId,
    pub description: String,
    /// Always non-negative.
    pub amount_cents: Cents,
    pub category: String,
    pub paid_by: MemberId,
    pub date: NaiveDate,
    pub split_method: SplitMethod,
    pub splits: Vec<ExpenseSplit>,
}

/// One debtor's share of an expense. The member id is a loose identifier,
/// not an enforced relation: it may outlive the member it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSplit {
    pub id: ExpenseSplitId,
    pub expense_id: ExpenseId,
    pub member_id: MemberId,
    pub amount_cents: Cents,
}

impl Expense {
    pub fn new(
        trip_id: TripId,
        description: String,
        amount_cents: Cents,
        category: String,
        paid_by: MemberId,
        date: NaiveDate,
    ) -> Result<Self, SplitError> {
        if amount_cents < 0 {
            return Err(SplitError::NegativeAmount(amount_cents));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            trip_id,
            description,
            amount_cents,
            category,
            paid_by,
            date,
            split_method: SplitMethod::default(),
            splits: Vec::new(),
        })
    }

    /// Replace the splits with an equal division of `amount_cents` across
    /// the given debtors, in their input order. An empty debtor list clears
    /// the splits.
    pub fn split_equally_among(&mut self, debtors: &[MemberId]) -> Result<(), SplitError> {
        if debtors.is_empty() {
            self.splits.clear();
            return Ok(());
        }

        let shares = equal_split(self.amount_cents, debtors.len())?;
        self.splits = debtors
            .iter()
            .zip(shares)
            .map(|(&member_id, amount_cents)| ExpenseSplit {
                id: Uuid::new_v4(),
                expense_id: self.id,
                member_id,
                amount_cents,
            })
            .collect();
        Ok(())
    }

    /// The debtor ids currently on file, in stored order.
    pub fn debtor_ids(&self) -> Vec<MemberId> {
        self.splits.iter().map(|s| s.member_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_expense(amount_cents: Cents) -> Expense {
        Expense::new(
            Uuid::new_v4(),
            "Dinner".into(),
            amount_cents,
            "food".into(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_splits_sum_to_amount() {
        let debtors = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let mut expense = sample_expense(10000);
        expense.split_equally_among(&debtors).unwrap();

        let total: Cents = expense.splits.iter().map(|s| s.amount_cents).sum();
        assert_eq!(total, 10000);
        assert_eq!(expense.debtor_ids(), debtors);
    }

    #[test]
    fn test_empty_debtor_list_clears_splits() {
        let mut expense = sample_expense(10000);
        expense.split_equally_among(&[Uuid::new_v4()]).unwrap();
        assert_eq!(expense.splits.len(), 1);

        expense.split_equally_among(&[]).unwrap();
        assert!(expense.splits.is_empty());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Expense::new(
            Uuid::new_v4(),
            "Dinner".into(),
            -100,
            "food".into(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
        );
        assert_eq!(result.unwrap_err(), SplitError::NegativeAmount(-100));
    }
}
