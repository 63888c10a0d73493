use std::collections::HashMap;

use super::{Cents, Expense, Member, MemberId};

/// Net balances for a trip, derived from its expenses and never persisted.
///
/// Every current member appears in the map, seeded at zero. A positive
/// balance means the member is owed money; negative means they owe.
/// Historical records naming removed members are skipped during
/// aggregation and counted here so callers can tell when the zero-sum
/// guarantee no longer applies.
#[derive(Debug, Clone, Default)]
pub struct BalanceSheet {
    pub balances: HashMap<MemberId, Cents>,
    /// Splits whose debtor is no longer a trip member.
    pub dropped_splits: usize,
    /// Expenses whose payer is no longer a trip member.
    pub dropped_payments: usize,
}

impl BalanceSheet {
    pub fn balance_for(&self, member_id: MemberId) -> Cents {
        self.balances.get(&member_id).copied().unwrap_or(0)
    }

    /// True when no historical record was excluded, in which case the
    /// balances are guaranteed to sum to zero.
    pub fn is_complete(&self) -> bool {
        self.dropped_splits == 0 && self.dropped_payments == 0
    }
}

/// Compute net balances for the current members of a trip.
///
/// Each expense credits its full amount to the payer and debits each split's
/// debtor. Both sides apply only while the referenced member is still
/// current; dangling references are tolerated historical state, excluded
/// from the totals and reported through the dropped counters.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> BalanceSheet {
    let mut sheet = BalanceSheet {
        balances: members.iter().map(|m| (m.id, 0)).collect(),
        ..Default::default()
    };

    for expense in expenses {
        match sheet.balances.get_mut(&expense.paid_by) {
            Some(balance) => *balance += expense.amount_cents,
            None => sheet.dropped_payments += 1,
        }

        for split in &expense.splits {
            match sheet.balances.get_mut(&split.member_id) {
                Some(balance) => *balance -= split.amount_cents,
                None => sheet.dropped_splits += 1,
            }
        }
    }

    sheet
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn make_members(trip_id: Uuid, names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .map(|name| Member::new(trip_id, name.to_string()))
            .collect()
    }

    fn make_expense(trip_id: Uuid, paid_by: MemberId, amount: Cents) -> Expense {
        Expense::new(
            trip_id,
            "expense".into(),
            amount,
            "misc".into(),
            paid_by,
            NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_no_expenses_all_zero() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana", "Ben"]);

        let sheet = compute_balances(&members, &[]);
        assert_eq!(sheet.balances.len(), 2);
        assert!(sheet.balances.values().all(|&b| b == 0));
        assert!(sheet.is_complete());
    }

    #[test]
    fn test_payer_credited_debtors_debited() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana", "Ben", "Cleo"]);
        let ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();

        let mut expense = make_expense(trip_id, ids[0], 9000);
        expense.split_equally_among(&ids).unwrap();

        let sheet = compute_balances(&members, &[expense]);
        // Ana paid 9000 and owes her own 3000 share
        assert_eq!(sheet.balance_for(ids[0]), 6000);
        assert_eq!(sheet.balance_for(ids[1]), -3000);
        assert_eq!(sheet.balance_for(ids[2]), -3000);
    }

    #[test]
    fn test_balances_sum_to_zero() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana", "Ben", "Cleo", "Dan"]);
        let ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();

        let mut dinner = make_expense(trip_id, ids[0], 10000);
        dinner.split_equally_among(&ids).unwrap();
        let mut taxi = make_expense(trip_id, ids[2], 3301);
        taxi.split_equally_among(&[ids[1], ids[2]]).unwrap();

        let sheet = compute_balances(&members, &[dinner, taxi]);
        assert!(sheet.is_complete());
        assert_eq!(sheet.balances.values().sum::<Cents>(), 0);
    }

    #[test]
    fn test_unsplit_expense_is_neutral_for_others() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana", "Ben"]);
        let ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();

        // No splits: the payer absorbed the cost
        let expense = make_expense(trip_id, ids[0], 4200);

        let sheet = compute_balances(&members, &[expense]);
        assert_eq!(sheet.balance_for(ids[0]), 4200);
        assert_eq!(sheet.balance_for(ids[1]), 0);
    }

    #[test]
    fn test_dangling_split_is_dropped_and_counted() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana", "Ben"]);
        let ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();
        let removed = Uuid::new_v4();

        let mut expense = make_expense(trip_id, ids[0], 9000);
        expense
            .split_equally_among(&[ids[0], ids[1], removed])
            .unwrap();

        let sheet = compute_balances(&members, &[expense]);
        assert_eq!(sheet.dropped_splits, 1);
        assert!(!sheet.is_complete());
        // Remaining members still carry their own shares
        assert_eq!(sheet.balance_for(ids[0]), 9000 - 3000);
        assert_eq!(sheet.balance_for(ids[1]), -3000);
        // The removed member gets no entry at all
        assert!(!sheet.balances.contains_key(&removed));
    }

    #[test]
    fn test_dangling_payer_is_dropped_and_counted() {
        let trip_id = Uuid::new_v4();
        let members = make_members(trip_id, &["Ana"]);
        let removed = Uuid::new_v4();

        let mut expense = make_expense(trip_id, removed, 5000);
        expense.split_equally_among(&[members[0].id]).unwrap();

        let sheet = compute_balances(&members, &[expense]);
        assert_eq!(sheet.dropped_payments, 1);
        assert_eq!(sheet.balance_for(members[0].id), -5000);
    }
}
