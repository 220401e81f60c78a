pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpPlanService, JsonConfigStore, OpenHolidaysClient};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;
pub use core::engine::PlanEngine;
pub use core::session::{ConfigSession, Notification, SessionCommand};
pub use domain::apartment::{ApartmentUnit, UnitDirection};
pub use domain::holidays::HolidaySet;
pub use domain::model::{Floor, Holiday, Position, SavedConfig};
pub use domain::registry::FloorRegistry;
pub use domain::selector::LastToWashSelector;
pub use utils::error::{PlannerError, Result};
