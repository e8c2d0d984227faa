use std::time::Duration;

use tokio::time::sleep;

use crate::{
    configuration::Config,
    error::Error,
    handler::credit_score,
    helpers::BackendMode,
    model::BeneficiaryRecord,
    types::{ApplicantInput, SaveResult, ScoreResult},
};

use super::{MemoryStore, HTTP};

/// Data source behind the API: either the local engine with an in-memory
/// store, or a remote scoring service.
#[derive(Debug)]
pub enum Backend {
    Mock { store: MemoryStore, latency: Duration },
    Remote(HTTP),
}

impl Backend {
    pub fn new(config: &Config) -> Result<Backend, Error> {
        let backend = match config.backend_mode {
            BackendMode::Mock => {
                let store = if config.seed_demo_data {
                    MemoryStore::with_demo_records()
                } else {
                    MemoryStore::new()
                };
                Backend::Mock {
                    store,
                    latency: Duration::from_millis(config.mock_latency_ms),
                }
            },
            BackendMode::Remote => Backend::Remote(HTTP::new(config)?),
        };

        Ok(backend)
    }

    pub fn mock(store: MemoryStore) -> Backend {
        Backend::Mock {
            store,
            latency: Duration::ZERO,
        }
    }

    pub fn mode(&self) -> BackendMode {
        match self {
            Backend::Mock { .. } => BackendMode::Mock,
            Backend::Remote(_) => BackendMode::Remote,
        }
    }

    async fn simulate_latency(latency: Duration) {
        if !latency.is_zero() {
            sleep(latency).await;
        }
    }

    pub async fn generate_credit_score(
        &self,
        input: &ApplicantInput,
    ) -> Result<ScoreResult, Error> {
        match self {
            Backend::Mock { latency, .. } => {
                Self::simulate_latency(*latency).await;
                Ok(credit_score::calculate(input))
            },
            Backend::Remote(http) => http.post_credit_score(input).await,
        }
    }

    pub async fn save_result(&self, data: &SaveResult) -> Result<(), Error> {
        match self {
            Backend::Mock { store, latency } => {
                Self::simulate_latency(*latency).await;
                store.save(data).await?;
                Ok(())
            },
            Backend::Remote(http) => http.post_save(data).await,
        }
    }

    pub async fn get_beneficiaries(
        &self,
    ) -> Result<Vec<BeneficiaryRecord>, Error> {
        match self {
            Backend::Mock { store, latency } => {
                Self::simulate_latency(*latency).await;
                Ok(store.list().await)
            },
            Backend::Remote(http) => http.get_beneficiaries().await,
        }
    }
}
