use std::collections::VecDeque;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::Error,
    helpers::{Decision, RiskBand},
    model::BeneficiaryRecord,
    types::SaveResult,
};

#[derive(Debug, Default)]
struct Records {
    items: VecDeque<BeneficiaryRecord>,
    last_id: u64,
}

/// In-memory result store, most recent record first.
///
/// Saves take the write lock for the whole insert, so ids stay unique and
/// ordering stays consistent with concurrent writers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the two sample beneficiaries.
    pub fn with_demo_records() -> Self {
        let now = Utc::now();
        let items = VecDeque::from(vec![
            BeneficiaryRecord {
                id: String::from("1"),
                name: String::from("Priya Sharma"),
                composite_score: 85,
                risk_band: RiskBand::LowRiskHighNeed,
                decision: Decision::AutoApprove,
                max_loan_amount: 450000.0,
                created_at: now - Duration::days(2),
            },
            BeneficiaryRecord {
                id: String::from("2"),
                name: String::from("Amit Patel"),
                composite_score: 65,
                risk_band: RiskBand::MediumRisk,
                decision: Decision::ManualReview,
                max_loan_amount: 200000.0,
                created_at: now - Duration::days(5),
            },
        ]);

        MemoryStore {
            records: RwLock::new(Records { items, last_id: 2 }),
        }
    }

    pub async fn save(
        &self,
        data: &SaveResult,
    ) -> Result<BeneficiaryRecord, Error> {
        if data.name.trim().is_empty() {
            return Err(Error::FieldNotExist(String::from("name")));
        }

        let mut records = self.records.write().await;
        let id = records.last_id.checked_add(1).ok_or_else(|| {
            Error::StoreUnavailable(String::from("record ids exhausted"))
        })?;
        let record = BeneficiaryRecord::from_save(id.to_string(), data, Utc::now());

        records.last_id = id;
        records.items.push_front(record.clone());
        info!("Result saved for {} with id {}", record.name, record.id);

        Ok(record)
    }

    pub async fn list(&self) -> Vec<BeneficiaryRecord> {
        let records = self.records.read().await;
        records.items.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::ScoreResult;

    fn save_request(name: &str, composite_score: u32) -> SaveResult {
        SaveResult {
            name: name.to_owned(),
            result: ScoreResult {
                repayment_score: 85,
                income_score: 57,
                composite_score,
                risk_band: RiskBand::LowRiskLowNeed,
                remaining_income: 20000.0,
                max_loan_amount: 400000.0,
                interest_rate: 11.5,
                tenure_months: 24,
                decision: Decision::AutoApprove,
                explanation: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_save_then_list_returns_record_first() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.save(&save_request("First", 60)).await.unwrap();
        let saved = store.save(&save_request("Second", 74)).await.unwrap();

        let items = store.list().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], saved);
        assert_eq!(items[0].name, "Second");
        assert_eq!(items[0].composite_score, 74);
        assert_eq!(items[0].max_loan_amount, 400000.0);
        assert_eq!(items[1].name, "First");
    }

    #[tokio::test]
    async fn test_list_does_not_mutate() {
        let store = MemoryStore::new();
        store.save(&save_request("Only", 60)).await.unwrap();

        let mut first = store.list().await;
        first.clear();

        assert_eq!(store.list().await.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_ids_continue_after_demo_records() {
        let store = MemoryStore::with_demo_records();
        assert_eq!(store.len().await, 2);

        let saved = store.save(&save_request("Ravi", 74)).await.unwrap();
        assert_eq!(saved.id, "3");

        let items = store.list().await;
        assert_eq!(items[0].id, "3");
        assert_eq!(items[1].name, "Priya Sharma");
        assert_eq!(items[2].name, "Amit Patel");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_without_mutation() {
        let store = MemoryStore::new();
        let result = store.save(&save_request("  ", 60)).await;

        assert!(matches!(result, Err(Error::FieldNotExist(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_unique_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = vec![];

        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save(&save_request(&format!("Applicant {}", i), 60)).await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut ids: Vec<u64> = store
            .list()
            .await
            .iter()
            .map(|record| record.id.parse().unwrap())
            .collect();
        assert_eq!(ids.len(), 20);

        // newest first means ids are strictly descending
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
