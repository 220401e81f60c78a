// Adapters layer: concrete implementations of the domain ports (http, storage).

pub mod config_store;
pub mod holidays_api;
pub mod plan_service;

pub use config_store::JsonConfigStore;
pub use holidays_api::OpenHolidaysClient;
pub use plan_service::HttpPlanService;
