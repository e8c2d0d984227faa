use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::{
    configuration::{parse_base_url, Config},
    error::Error,
    model::BeneficiaryRecord,
    types::{ApplicantInput, SaveResult, ScoreResult},
};

/// Client for a scoring backend that exposes the same API as this service.
#[derive(Debug)]
pub struct HTTP {
    pub base_url: Url,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: &Config) -> Result<HTTP, Error> {
        let base_url = parse_base_url(&config.api_base_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(Error::ReqwestError)?;

        Ok(HTTP { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    fn check_status(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        Ok(response)
    }

    pub async fn post_credit_score(
        &self,
        input: &ApplicantInput,
    ) -> Result<ScoreResult, Error> {
        let url = self.endpoint("api/credit-score")?;
        debug!("POST {}", &url);

        let response = self.http.post(url).json(input).send().await?;
        let result = Self::check_status(response)?
            .json::<ScoreResult>()
            .await?;

        Ok(result)
    }

    pub async fn post_save(&self, data: &SaveResult) -> Result<(), Error> {
        let url = self.endpoint("api/save")?;
        debug!("POST {}", &url);

        let response = self.http.post(url).json(data).send().await?;
        Self::check_status(response)?;

        Ok(())
    }

    pub async fn get_beneficiaries(
        &self,
    ) -> Result<Vec<BeneficiaryRecord>, Error> {
        let url = self.endpoint("api/beneficiaries")?;
        debug!("GET {}", &url);

        let response = self.http.get(url).send().await?;
        let items = Self::check_status(response)?
            .json::<Vec<BeneficiaryRecord>>()
            .await?;

        Ok(items)
    }
}
