use crate::domain::apartment::UnitDirection;
use crate::domain::holidays::HolidaySet;
use crate::domain::model::{
    Floor, Holiday, HolidayQuery, PlanConfig, PlanRequest, Position, SavedConfig, Subdivision,
};
use crate::domain::registry::FloorRegistry;
use crate::domain::selector::LastToWashSelector;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::validate_range;
use chrono::NaiveDate;

pub const LOWEST_YEAR: u16 = 2020;
pub const HIGHEST_YEAR: u16 = 2050;

/// A discrete user action on the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddRow,
    RemoveRow,
    SetGroundFloor(bool),
    AddApartment(Floor),
    RemoveApartment(Floor),
    SetSlotTotal { floor: Floor, index: usize, days: u8 },
    SelectFloor(Floor),
    SelectPosition(Position),
    SelectDay(u8),
    AddHoliday { date: NaiveDate, name: String },
    RemoveHoliday(NaiveDate),
    MergeHolidays(Vec<Holiday>),
    SetTitle(String),
    SetYear(u16),
    SetExcludeSunday(bool),
    SetCountry(Option<String>),
    SetSubdivision(Option<String>),
    SetSubdivisions(Vec<Subdivision>),
    LoadConfig(SavedConfig),
}

/// A message for the user about a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub suggestion: &'static str,
}

/// Everything one user is configuring.
///
/// Commands are applied one at a time through [`ConfigSession::apply`]; any
/// command that touches the floor registry re-validates the last-to-wash
/// selection before it returns.
#[derive(Debug, Clone)]
pub struct ConfigSession {
    registry: FloorRegistry,
    selector: LastToWashSelector,
    holidays: HolidaySet,
    title: String,
    year: Option<u16>,
    exclude_sunday: bool,
    country: Option<String>,
    subdivision: Option<String>,
    subdivisions: Vec<Subdivision>,
    notifications: Vec<Notification>,
}

impl Default for ConfigSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSession {
    pub fn new() -> Self {
        Self {
            registry: FloorRegistry::new(),
            selector: LastToWashSelector::new(),
            holidays: HolidaySet::new(),
            title: String::new(),
            year: None,
            exclude_sunday: true,
            country: None,
            subdivision: None,
            subdivisions: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    pub fn selector(&self) -> &LastToWashSelector {
        &self.selector
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn exclude_sunday(&self) -> bool {
        self.exclude_sunday
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn subdivision(&self) -> Option<&str> {
        self.subdivision.as_deref()
    }

    pub fn subdivisions(&self) -> &[Subdivision] {
        &self.subdivisions
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn apply(&mut self, command: SessionCommand) -> Result<()> {
        tracing::debug!("Applying {:?}", command);
        match command {
            SessionCommand::AddRow => {
                self.registry.append_row();
                self.registry_changed();
            }
            SessionCommand::RemoveRow => {
                self.registry.remove_row();
                self.registry_changed();
            }
            SessionCommand::SetGroundFloor(present) => {
                self.registry.set_ground_floor(present);
                self.registry_changed();
            }
            SessionCommand::AddApartment(floor) => {
                self.registry
                    .adjust_unit_count(floor, UnitDirection::Increase);
                self.registry_changed();
            }
            SessionCommand::RemoveApartment(floor) => {
                self.registry
                    .adjust_unit_count(floor, UnitDirection::Decrease);
                self.registry_changed();
            }
            SessionCommand::SetSlotTotal { floor, index, days } => {
                self.registry.set_slot_total(floor, index, days);
                self.registry_changed();
            }
            SessionCommand::SelectFloor(floor) => {
                self.selector.select_floor(&self.registry, floor)?;
            }
            SessionCommand::SelectPosition(position) => {
                self.selector.select_position(position)?;
            }
            SessionCommand::SelectDay(day) => {
                self.selector.select_day(day)?;
            }
            SessionCommand::AddHoliday { date, name } => {
                self.holidays.insert_manual(date, name);
            }
            SessionCommand::RemoveHoliday(date) => {
                self.holidays.remove(date);
            }
            SessionCommand::MergeHolidays(incoming) => {
                let added = self.holidays.merge_from_source(incoming);
                tracing::debug!("Merged holidays, {} new dates", added);
            }
            SessionCommand::SetTitle(title) => {
                self.title = title;
            }
            SessionCommand::SetYear(year) => {
                validate_range("year", year, LOWEST_YEAR, HIGHEST_YEAR)?;
                self.year = Some(year);
            }
            SessionCommand::SetExcludeSunday(exclude) => {
                self.exclude_sunday = exclude;
            }
            SessionCommand::SetCountry(country) => {
                if country != self.country {
                    self.subdivision = None;
                    self.subdivisions.clear();
                }
                self.country = country;
            }
            SessionCommand::SetSubdivision(code) => {
                if let Some(code) = &code {
                    let known = self.subdivisions.is_empty()
                        || self.subdivisions.iter().any(|s| &s.code == code);
                    if !known {
                        return Err(PlannerError::InvalidSelection {
                            message: format!("unknown subdivision '{}'", code),
                        });
                    }
                }
                self.subdivision = code;
            }
            SessionCommand::SetSubdivisions(subdivisions) => {
                let still_offered = self
                    .subdivision
                    .as_ref()
                    .map_or(true, |code| subdivisions.iter().any(|s| &s.code == code));
                if !still_offered {
                    self.subdivision = None;
                }
                self.subdivisions = subdivisions;
            }
            SessionCommand::LoadConfig(saved) => {
                let registry = FloorRegistry::from_position_map(&saved.config.position_map)?;
                self.registry = registry;
                self.title = saved.config.title;
                if !saved.holidays.is_empty() {
                    self.holidays.merge_from_source(saved.holidays);
                }
                self.registry_changed();
            }
        }
        Ok(())
    }

    fn registry_changed(&mut self) {
        self.selector.revalidate(&self.registry);
    }

    /// Fields still needed before a plan can be requested.
    pub fn missing_for_plan(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.year.is_none() {
            missing.push("year");
        }
        if self.selector.floor().is_none() {
            missing.push("floor");
        }
        if self.selector.position().is_none() {
            missing.push("position");
        }
        if self.selector.day().is_none() {
            missing.push("day");
        }
        missing
    }

    pub fn can_create_plan(&self) -> bool {
        self.missing_for_plan().is_empty()
    }

    pub fn plan_config(&self) -> PlanConfig {
        PlanConfig {
            position_map: self.registry.to_position_map(),
            title: self.title.clone(),
        }
    }

    pub fn plan_request(&self) -> Result<PlanRequest> {
        let missing = self.missing_for_plan();
        let (Some(year), Some(apartment_info), true) =
            (self.year, self.selector.apartment_info(), missing.is_empty())
        else {
            return Err(PlannerError::NotReady { missing });
        };
        Ok(PlanRequest {
            config: self.plan_config(),
            year,
            apartment_info,
            holidays: self.holidays.to_wire(),
            exclude_sunday: self.exclude_sunday,
        })
    }

    pub fn can_fetch_holidays(&self) -> bool {
        self.holiday_query().is_ok()
    }

    pub fn holiday_query(&self) -> Result<HolidayQuery> {
        match (self.year, &self.country, &self.subdivision) {
            (Some(year), Some(country), Some(subdivision)) => Ok(HolidayQuery {
                year,
                country_iso: country.clone(),
                subdivision_iso: subdivision.clone(),
            }),
            _ => {
                let mut missing = Vec::new();
                if self.year.is_none() {
                    missing.push("year");
                }
                if self.country.is_none() {
                    missing.push("country");
                }
                if self.subdivision.is_none() {
                    missing.push("subdivision");
                }
                Err(PlannerError::NotReady { missing })
            }
        }
    }

    pub fn saved_config(&self) -> SavedConfig {
        SavedConfig {
            config: self.plan_config(),
            holidays: self.holidays.as_slice().to_vec(),
        }
    }

    /// Turns a failure into a user-visible notification. A cancelled file
    /// choice is not an error and produces nothing.
    pub fn report(&mut self, error: &PlannerError) {
        if error.is_cancellation() {
            tracing::debug!("File selection cancelled");
            return;
        }
        tracing::error!(
            "{} (Category: {:?}, Severity: {:?})",
            error,
            error.category(),
            error.severity()
        );
        self.notifications.push(Notification {
            message: error.user_friendly_message(),
            suggestion: error.recovery_suggestion(),
        });
    }
}
