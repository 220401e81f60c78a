use crate::domain::model::PlanRequest;
use crate::domain::ports::PlanService;
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Posts plan requests to a remote renderer and returns its HTML.
#[derive(Debug, Clone)]
pub struct HttpPlanService {
    endpoint: String,
    client: Client,
}

impl HttpPlanService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn create_laundry_plan(&self, request: &PlanRequest) -> Result<String> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(PlannerError::ServiceError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
