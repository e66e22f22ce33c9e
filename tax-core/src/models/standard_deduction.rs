use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatusCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub filing_status: FilingStatusCode,
    pub amount: Decimal,
}
