use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive schedule.
///
/// The lower bound is implicit: it is the previous bracket's `max_income`, or
/// zero for the first bracket. `max_income == None` marks the top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        max_income: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            max_income: Some(max_income),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            max_income: None,
            rate,
        }
    }

    /// Whether `income` falls at or below this bracket's upper limit.
    /// The top bracket contains every income.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        self.max_income.is_none_or(|max| income <= max)
    }
}
