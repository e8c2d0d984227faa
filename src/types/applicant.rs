use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    helpers::{deserialize_amount, deserialize_label, RepaymentHistory},
};

/// Largest accepted amount (one lakh crore). Keeps every derived figure,
/// including twenty times the remaining income, finite.
pub const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    pub name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub monthly_income: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub monthly_expenses: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub avg_electricity_bill: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub bank_inflow_6m: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub bank_outflow_6m: f64,
    /// Label as submitted; see [`ApplicantInput::history`].
    #[serde(default, deserialize_with = "deserialize_label")]
    pub repayment_history: String,
}

impl ApplicantInput {
    pub fn history(&self) -> RepaymentHistory {
        RepaymentHistory::from(self.repayment_history.as_str())
    }

    /// Boundary checks run before scoring. The engine itself assumes every
    /// amount is finite and non-negative and that income is positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::FieldNotExist(String::from("name")));
        }

        let amounts = [
            ("monthly_income", self.monthly_income),
            ("monthly_expenses", self.monthly_expenses),
            ("avg_electricity_bill", self.avg_electricity_bill),
            ("bank_inflow_6m", self.bank_inflow_6m),
            ("bank_outflow_6m", self.bank_outflow_6m),
        ];

        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "{} must be a non-negative number",
                    field
                )));
            }
            if value > MAX_AMOUNT {
                return Err(Error::InvalidInput(format!(
                    "{} must not exceed {}",
                    field, MAX_AMOUNT
                )));
            }
        }

        if self.monthly_income <= 0.0 {
            return Err(Error::InvalidInput(String::from(
                "monthly_income must be greater than zero",
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> ApplicantInput {
        ApplicantInput {
            name: String::from("Ravi Kumar"),
            monthly_income: 50000.0,
            monthly_expenses: 30000.0,
            avg_electricity_bill: 2000.0,
            bank_inflow_6m: 300000.0,
            bank_outflow_6m: 250000.0,
            repayment_history: String::from("Good"),
        }
    }

    #[test]
    fn test_parse_form_payload_with_string_amounts() {
        let body = r#"{
            "name": "Ravi Kumar",
            "monthly_income": "50000",
            "monthly_expenses": 30000,
            "avg_electricity_bill": "2000",
            "bank_inflow_6m": 300000,
            "bank_outflow_6m": "250000",
            "repayment_history": "Good"
        }"#;

        let parsed: ApplicantInput = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, applicant());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_missing_repayment_history_is_unknown() {
        let body = r#"{
            "name": "Ravi Kumar",
            "monthly_income": 50000,
            "monthly_expenses": 30000,
            "avg_electricity_bill": 2000,
            "bank_inflow_6m": 300000,
            "bank_outflow_6m": 250000
        }"#;

        let parsed: ApplicantInput = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.repayment_history, "");
        assert_eq!(parsed.history(), RepaymentHistory::Unknown);
    }

    #[test]
    fn test_any_repayment_value_is_accepted() {
        let body = r#"{
            "name": "Ravi Kumar",
            "monthly_income": 50000,
            "monthly_expenses": 30000,
            "avg_electricity_bill": 2000,
            "bank_inflow_6m": 300000,
            "bank_outflow_6m": 250000,
            "repayment_history": 3
        }"#;
        let parsed: ApplicantInput = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.repayment_history, "3");
        assert_eq!(parsed.history(), RepaymentHistory::Unknown);

        let body = body.replace("3\n", "\"Excellent\"\n");
        let parsed: ApplicantInput = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.repayment_history, "Excellent");
        assert_eq!(parsed.history(), RepaymentHistory::Unknown);

        let body = body.replace("\"Excellent\"", "null");
        let parsed: ApplicantInput = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.repayment_history, "");
    }

    #[test]
    fn test_missing_amount_is_rejected() {
        let body = r#"{"name": "Ravi Kumar", "monthly_income": 50000}"#;
        assert!(serde_json::from_str::<ApplicantInput>(body).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        let mut input = applicant();
        input.monthly_income = 0.0;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = applicant();
        input.bank_outflow_6m = -1.0;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = applicant();
        input.monthly_expenses = f64::NAN;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = applicant();
        input.name = String::from("   ");
        assert!(matches!(input.validate(), Err(Error::FieldNotExist(_))));
    }

    #[test]
    fn test_validate_rejects_huge_amounts() {
        let mut input = applicant();
        input.monthly_income = 1.0e307;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = applicant();
        input.bank_inflow_6m = MAX_AMOUNT * 2.0;
        assert!(matches!(input.validate(), Err(Error::InvalidInput(_))));

        let mut input = applicant();
        input.monthly_income = MAX_AMOUNT;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_zero_inflow_passes_validation() {
        let mut input = applicant();
        input.bank_inflow_6m = 0.0;
        input.bank_outflow_6m = 0.0;
        assert!(input.validate().is_ok());
    }
}
