use serde::{Deserialize, Serialize};

use super::Cents;

/// How an expense amount is allocated across its debtors.
/// Only equal division is implemented; the enum keeps the field extensible
/// so new strategies (proportional, exact shares) can be added without
/// reshaping the expense entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    #[default]
    Equal,
}

impl SplitMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "equal" => Some(SplitMethod::Equal),
            _ => None,
        }
    }
}

impl std::fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Divide `amount_cents` as evenly as integer division allows across
/// `debtor_count` debtors.
///
/// With `amount = q * n + r`, the first `r` debtors (in input order) receive
/// `q + 1` cents and the rest receive `q`. The result always sums to the
/// amount exactly and no two shares differ by more than one cent.
pub fn equal_split(amount_cents: Cents, debtor_count: usize) -> Result<Vec<Cents>, SplitError> {
    if amount_cents < 0 {
        return Err(SplitError::NegativeAmount(amount_cents));
    }
    if debtor_count == 0 {
        return Err(SplitError::NoDebtors);
    }

    let n = debtor_count as Cents;
    let quotient = amount_cents / n;
    let remainder = (amount_cents % n) as usize;

    Ok((0..debtor_count)
        .map(|i| if i < remainder { quotient + 1 } else { quotient })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    NegativeAmount(Cents),
    NoDebtors,
    /// The same debtor appears twice in the split list.
    DuplicateDebtor(String),
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::NegativeAmount(cents) => {
                write!(f, "cannot split a negative amount ({} cents)", cents)
            }
            SplitError::NoDebtors => write!(f, "cannot split among an empty debtor list"),
            SplitError::DuplicateDebtor(id) => {
                write!(f, "debtor {} appears more than once in the split", id)
            }
        }
    }
}

impl std::error::Error for SplitError {}
