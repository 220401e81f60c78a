use crate::domain::model::{Holiday, PlanRequest, SavedConfig, Subdivision};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Renders a laundry plan; the response body is an HTML preview.
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn create_laundry_plan(&self, request: &PlanRequest) -> Result<String>;
}

#[async_trait]
pub trait HolidayProvider: Send + Sync {
    async fn get_subdivisions(&self, country_iso: &str) -> Result<Vec<Subdivision>>;

    async fn get_holidays(
        &self,
        year: u16,
        country_iso: &str,
        subdivision_iso: &str,
    ) -> Result<Vec<Holiday>>;
}

/// Persistence of the building configuration.
///
/// `read_config` reports [`crate::PlannerError::NoPathGiven`] when the user
/// did not choose a file.
pub trait ConfigStore: Send + Sync {
    fn save_config(
        &self,
        config: &SavedConfig,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn read_config(&self) -> impl std::future::Future<Output = Result<SavedConfig>> + Send;
}
