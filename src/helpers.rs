use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepaymentHistory {
    Good,
    Average,
    Poor,
    #[default]
    Unknown,
}

impl RepaymentHistory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentHistory::Good => "Good",
            RepaymentHistory::Average => "Average",
            RepaymentHistory::Poor => "Poor",
            RepaymentHistory::Unknown => "Unknown",
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            RepaymentHistory::Good => 85,
            RepaymentHistory::Average => 65,
            RepaymentHistory::Poor => 40,
            RepaymentHistory::Unknown => 70,
        }
    }
}

impl fmt::Display for RepaymentHistory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Any label other than the three known ones maps to `Unknown`.
impl From<&str> for RepaymentHistory {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Good" => RepaymentHistory::Good,
            "Average" => RepaymentHistory::Average,
            "Poor" => RepaymentHistory::Poor,
            _ => RepaymentHistory::Unknown,
        }
    }
}

/// Risk bands ordered from lowest to highest risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RiskBand {
    #[serde(rename = "Low Risk - High Need")]
    LowRiskHighNeed,
    #[serde(rename = "Low Risk - Low Need")]
    LowRiskLowNeed,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Very High Risk")]
    VeryHighRisk,
}

impl RiskBand {
    pub const ALL: [RiskBand; 5] = [
        RiskBand::LowRiskHighNeed,
        RiskBand::LowRiskLowNeed,
        RiskBand::MediumRisk,
        RiskBand::HighRisk,
        RiskBand::VeryHighRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::LowRiskHighNeed => "Low Risk - High Need",
            RiskBand::LowRiskLowNeed => "Low Risk - Low Need",
            RiskBand::MediumRisk => "Medium Risk",
            RiskBand::HighRisk => "High Risk",
            RiskBand::VeryHighRisk => "Very High Risk",
        }
    }

    /// Annual interest rate in percent.
    pub fn interest_rate(&self) -> f64 {
        match self {
            RiskBand::LowRiskHighNeed => 10.5,
            RiskBand::LowRiskLowNeed => 11.5,
            RiskBand::MediumRisk => 14.0,
            RiskBand::HighRisk => 18.0,
            RiskBand::VeryHighRisk => 22.0,
        }
    }

    pub fn decision(&self) -> Decision {
        match self {
            RiskBand::LowRiskHighNeed | RiskBand::LowRiskLowNeed => {
                Decision::AutoApprove
            },
            RiskBand::MediumRisk | RiskBand::HighRisk => Decision::ManualReview,
            RiskBand::VeryHighRisk => Decision::Reject,
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskBand {
    type Err = Error;

    fn from_str(value: &str) -> Result<RiskBand, Self::Err> {
        RiskBand::ALL
            .into_iter()
            .find(|band| band.as_str() == value)
            .ok_or_else(|| {
                Error::InvalidInput(format!("Risk band {} not supported", value))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "Auto-Approve")]
    AutoApprove,
    #[serde(rename = "Manual Review")]
    ManualReview,
    #[serde(rename = "Reject")]
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AutoApprove => "Auto-Approve",
            Decision::ManualReview => "Manual Review",
            Decision::Reject => "Reject",
        }
    }

    pub fn closing_sentence(&self) -> &'static str {
        match self {
            Decision::AutoApprove => {
                "Your application can proceed for immediate disbursement."
            },
            Decision::ManualReview => {
                "Your application requires additional verification by our credit team."
            },
            Decision::Reject => {
                "Unfortunately, we cannot approve the loan at this time. Please improve your financial profile and reapply."
            },
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Mock,
    Remote,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Mock => "mock",
            BackendMode::Remote => "remote",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for BackendMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Rounds halves toward positive infinity (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Formats an amount with Indian digit grouping (`4,00,000`) and at most
/// three fraction digits.
pub fn format_inr(value: f64) -> String {
    let scaled = (value.abs() * 1000.0).round() as u64;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let mut formatted = String::new();
    if value < 0.0 && scaled > 0 {
        formatted.push('-');
    }
    formatted.push_str(&group_indian(&whole.to_string()));

    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        formatted.push('.');
        formatted.push_str(digits.trim_end_matches('0'));
    }

    formatted
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();

    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Accepts an amount as a JSON number or a numeric string.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            de::Error::custom(format!("invalid amount {:?}", text))
        }),
    }
}

/// Accepts any JSON value as a free-form label. Strings are kept as sent,
/// `null` becomes empty and anything else keeps its JSON text.
pub fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let label = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => text,
        Some(value) => value.to_string(),
        None => String::new(),
    };

    Ok(label)
}
