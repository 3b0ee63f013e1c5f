use crate::db::models::transactions::NewTransactionModel;
use crate::strategy::types::StockProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Paper,
    Live,
}

impl ExecutionMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "paper" => Some(Self::Paper),
            "live" => Some(Self::Live),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

/// How the interactive purchase of a pick ended
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Buy prompt answered with anything but `y`
    Declined,
    /// Details entered, then `n` at the finish prompt
    Abandoned(NewTransactionModel),
    Recorded { id: i32, transaction: NewTransactionModel },
}

impl PurchaseOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// Result of one full selection cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub ranked: Vec<StockProfile>,
    pub pick: StockProfile,
    pub outcome: PurchaseOutcome,
}
