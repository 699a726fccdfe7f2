use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The trusted reference figures the deck is audited against. These come
/// from the bookkeeping side and are fixed; nothing in the deck changes
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenRecord {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_loss: f64,
    pub current_cash: f64,
    pub consultant_spend: f64,
    pub credit_card_expenses: f64,
    pub auto_loan_expenses: f64,
    pub bank_fees: f64,
}

impl Default for GoldenRecord {
    fn default() -> Self {
        Self {
            total_revenue: 181_320.01,
            total_expenses: 312_800.27,
            net_loss: -131_480.26,
            current_cash: 48_941.01,
            consultant_spend: 125_081.72,
            credit_card_expenses: 152_374.31,
            auto_loan_expenses: 34_034.24,
            bank_fees: 1_310.00,
        }
    }
}

/// The reconciliation artifact: golden record plus empty placeholder maps
/// to be filled in by a later manual or external comparison pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationTemplate {
    pub our_numbers: GoldenRecord,
    pub powerpoint_numbers: BTreeMap<String, f64>,
    pub variances: BTreeMap<String, f64>,
    pub notes: String,
}

impl ReconciliationTemplate {
    pub fn new() -> Self {
        Self {
            our_numbers: GoldenRecord::default(),
            powerpoint_numbers: BTreeMap::new(),
            variances: BTreeMap::new(),
            notes: "Numbers to be filled in after PowerPoint analysis".to_string(),
        }
    }
}

impl Default for ReconciliationTemplate {
    fn default() -> Self {
        Self::new()
    }
}
