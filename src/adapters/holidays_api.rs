use crate::domain::model::{Holiday, Subdivision};
use crate::domain::ports::HolidayProvider;
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://openholidaysapi.org";
pub const DEFAULT_LANGUAGE: &str = "DE";

#[derive(Debug, Deserialize)]
struct LocalizedText {
    language: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicHolidayEntry {
    start_date: NaiveDate,
    name: Vec<LocalizedText>,
}

#[derive(Debug, Deserialize)]
struct SubdivisionEntry {
    code: String,
    name: Vec<LocalizedText>,
}

/// Client for the OpenHolidays REST API.
#[derive(Debug, Clone)]
pub struct OpenHolidaysClient {
    endpoint: String,
    language: String,
    client: Client,
}

impl Default for OpenHolidaysClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_LANGUAGE)
    }
}

impl OpenHolidaysClient {
    pub fn new(endpoint: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            language: language.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Text in the configured language, or the first one offered.
    fn pick_name(&self, names: &[LocalizedText]) -> String {
        names
            .iter()
            .find(|n| n.language.eq_ignore_ascii_case(&self.language))
            .or_else(|| names.first())
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PlannerError::ServiceError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl HolidayProvider for OpenHolidaysClient {
    async fn get_subdivisions(&self, country_iso: &str) -> Result<Vec<Subdivision>> {
        let url = format!("{}/Subdivisions", self.endpoint);
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("countryIsoCode", country_iso),
                ("languageIsoCode", self.language.as_str()),
            ])
            .send()
            .await?;

        let entries: Vec<SubdivisionEntry> = Self::check(response).await?.json().await?;
        let mut subdivisions: Vec<Subdivision> = entries
            .into_iter()
            .map(|entry| Subdivision {
                name: self.pick_name(&entry.name),
                code: entry.code,
            })
            .collect();
        subdivisions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subdivisions)
    }

    async fn get_holidays(
        &self,
        year: u16,
        country_iso: &str,
        subdivision_iso: &str,
    ) -> Result<Vec<Holiday>> {
        let url = format!("{}/PublicHolidays", self.endpoint);
        let valid_from = format!("{}-01-01", year);
        let valid_to = format!("{}-12-31", year);
        tracing::debug!("Making API request to: {} ({})", url, year);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("countryIsoCode", country_iso),
                ("languageIsoCode", self.language.as_str()),
                ("validFrom", valid_from.as_str()),
                ("validTo", valid_to.as_str()),
                ("subdivisionCode", subdivision_iso),
            ])
            .send()
            .await?;

        let entries: Vec<PublicHolidayEntry> = Self::check(response).await?.json().await?;
        Ok(entries
            .into_iter()
            .map(|entry| Holiday::new(entry.start_date, self.pick_name(&entry.name)))
            .collect())
    }
}
