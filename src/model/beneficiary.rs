use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    helpers::{Decision, RiskBand},
    types::SaveResult,
};

/// A saved scoring outcome. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryRecord {
    pub id: String,
    pub name: String,
    pub composite_score: u32,
    pub risk_band: RiskBand,
    pub decision: Decision,
    pub max_loan_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl BeneficiaryRecord {
    pub fn from_save(
        id: String,
        data: &SaveResult,
        created_at: DateTime<Utc>,
    ) -> BeneficiaryRecord {
        BeneficiaryRecord {
            id,
            name: data.name.to_owned(),
            composite_score: data.result.composite_score,
            risk_band: data.result.risk_band,
            decision: data.result.decision,
            max_loan_amount: data.result.max_loan_amount,
            created_at,
        }
    }
}
