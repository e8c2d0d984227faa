use serde::{Deserialize, Serialize};

use crate::helpers::{Decision, RiskBand};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub repayment_score: u32,
    pub income_score: u32,
    pub composite_score: u32,
    pub risk_band: RiskBand,
    pub remaining_income: f64,
    pub max_loan_amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
    pub decision: Decision,
    pub explanation: String,
}

/// Body of a save request: a computed result plus the applicant's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResult {
    pub name: String,
    #[serde(flatten)]
    pub result: ScoreResult,
}
