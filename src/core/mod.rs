pub mod engine;
pub mod session;

pub use crate::domain::ports::{ConfigStore, HolidayProvider, PlanService};
