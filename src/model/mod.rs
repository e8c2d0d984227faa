//! Stored entities.

mod beneficiary;

pub use beneficiary::BeneficiaryRecord;
