use crate::adapters::holidays_api::{DEFAULT_ENDPOINT, DEFAULT_LANGUAGE};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PLAN_SERVICE_ENDPOINT: &str = "http://127.0.0.1:8000/create_laundry_plan";

/// Settings file of the planner.
///
/// Every section is optional; missing values fall back to the public
/// OpenHolidays API, a local plan renderer and no stored configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub holidays: HolidaysSettings,
    #[serde(default)]
    pub plan_service: PlanServiceSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidaysSettings {
    #[serde(default = "default_holidays_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for HolidaysSettings {
    fn default() -> Self {
        Self {
            endpoint: default_holidays_endpoint(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanServiceSettings {
    #[serde(default = "default_plan_service_endpoint")]
    pub endpoint: String,
}

impl Default for PlanServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_plan_service_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    pub country: Option<String>,
    pub subdivision: Option<String>,
    #[serde(default = "default_exclude_sunday")]
    pub exclude_sunday: bool,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            country: None,
            subdivision: None,
            exclude_sunday: default_exclude_sunday(),
        }
    }
}

fn default_holidays_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_plan_service_endpoint() -> String {
    DEFAULT_PLAN_SERVICE_ENDPOINT.to_string()
}

fn default_exclude_sunday() -> bool {
    true
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Reads the file if it exists, otherwise returns the defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("holidays.endpoint", &self.holidays.endpoint)?;
        validate_non_empty_string("holidays.language", &self.holidays.language)?;
        validate_url("plan_service.endpoint", &self.plan_service.endpoint)?;

        if let Some(path) = &self.storage.config_path {
            validate_path("storage.config_path", path)?;
        }

        if self.defaults.subdivision.is_some() {
            validate_required_field("defaults.country", &self.defaults.country)?;
        }

        Ok(())
    }
}
