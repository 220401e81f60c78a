use crate::core::session::{SessionCommand, HIGHEST_YEAR, LOWEST_YEAR};
use crate::domain::model::{Floor, Position};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// A holiday given as `DATE=NAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayArg {
    pub date: NaiveDate,
    pub name: String,
}

/// Accepts `25.12.2025=Weihnachten` or `2025-12-25=Weihnachten`.
pub fn parse_holiday_arg(s: &str) -> std::result::Result<HolidayArg, String> {
    let (date, name) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' must look like DATE=NAME", s))?;
    let date = date.trim();
    let date = NaiveDate::parse_from_str(date, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .map_err(|_| format!("'{}' is not a date (expected D.M.YYYY or YYYY-MM-DD)", date))?;
    Ok(HolidayArg {
        date,
        name: name.trim().to_string(),
    })
}

#[derive(Debug, Clone, Parser)]
#[command(name = "laundry-planner")]
#[command(about = "Builds a laundry rotation plan for an apartment building")]
pub struct CliConfig {
    #[arg(long, default_value = "laundry-planner.toml", help = "Settings file")]
    pub settings: PathBuf,

    #[arg(long, help = "Building configuration JSON (overrides storage.config_path)")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub year: Option<u16>,

    #[arg(long, help = "Floor of the last apartment that washed (P for ground)")]
    pub floor: Option<Floor>,

    #[arg(long, help = "single, left, middle or right")]
    pub position: Option<Position>,

    #[arg(long, help = "Days that apartment already used")]
    pub day: Option<u8>,

    #[arg(long, help = "ISO country code for public holidays")]
    pub country: Option<String>,

    #[arg(long, help = "ISO subdivision code for public holidays")]
    pub subdivision: Option<String>,

    #[arg(long, help = "Import public holidays before rendering")]
    pub fetch_holidays: bool,

    #[arg(long = "holiday", value_parser = parse_holiday_arg, help = "Extra holiday as DATE=NAME")]
    pub holidays: Vec<HolidayArg>,

    #[arg(long, help = "Schedule washing on Sundays too")]
    pub allow_sunday: bool,

    #[arg(long, help = "Write the session back to the configuration file")]
    pub save: bool,

    #[arg(long, default_value = "laundry-plan.html")]
    pub output: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Commands for the flags that change the session, in the order a user
    /// would click through them.
    pub fn session_commands(&self) -> Vec<SessionCommand> {
        let mut commands = Vec::new();
        if let Some(title) = &self.title {
            commands.push(SessionCommand::SetTitle(title.clone()));
        }
        if let Some(year) = self.year {
            commands.push(SessionCommand::SetYear(year));
        }
        if self.allow_sunday {
            commands.push(SessionCommand::SetExcludeSunday(false));
        }
        for holiday in &self.holidays {
            commands.push(SessionCommand::AddHoliday {
                date: holiday.date,
                name: holiday.name.clone(),
            });
        }
        if let Some(floor) = self.floor {
            commands.push(SessionCommand::SelectFloor(floor));
        }
        if let Some(position) = self.position {
            commands.push(SessionCommand::SelectPosition(position));
        }
        if let Some(day) = self.day {
            commands.push(SessionCommand::SelectDay(day));
        }
        commands
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output", &self.output.to_string_lossy())?;
        if let Some(year) = self.year {
            validate_range("year", year, LOWEST_YEAR, HIGHEST_YEAR)?;
        }
        Ok(())
    }
}
