use reqwest::Client;
use std::time::Duration;

use crate::models::{PredictionRequest, PredictionResponse};
use super::{endpoint, read_response, ClientError};

pub struct PredictorClient {
    client: Client,
    base_url: String,
}

impl PredictorClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "/predict_price/"))
            .json(request)
            .send()
            .await?;

        read_response(response).await
    }
}
