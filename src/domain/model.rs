use crate::domain::apartment::ApartmentUnit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A building level. `Ground` sorts below every numbered floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Floor {
    Ground,
    Upper(u32),
}

impl Floor {
    /// The floor directly above this one.
    pub fn next(self) -> Floor {
        match self {
            Floor::Ground => Floor::Upper(1),
            Floor::Upper(n) => Floor::Upper(n + 1),
        }
    }

    /// Numeric form handed to the scheduler; ground is 0.
    pub fn number(self) -> u32 {
        match self {
            Floor::Ground => 0,
            Floor::Upper(n) => n,
        }
    }

    pub fn key(self) -> String {
        self.number().to_string()
    }

    pub fn from_number(number: u32) -> Floor {
        if number == 0 {
            Floor::Ground
        } else {
            Floor::Upper(number)
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Floor::Ground => write!(f, "P"),
            Floor::Upper(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Floor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("p") {
            return Ok(Floor::Ground);
        }
        trimmed
            .parse::<u32>()
            .map(Floor::from_number)
            .map_err(|_| format!("'{}' is not a floor (expected P, 0 or a floor number)", s))
    }
}

/// Apartment position as understood by the scheduling service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorPosition {
    Left,
    Middle,
    Right,
}

/// A position offered by the last-to-wash selector.
///
/// Single-apartment floors expose one synthetic `Single` position, which the
/// scheduler knows as `Middle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Single,
    Left,
    Middle,
    Right,
}

impl Position {
    pub fn floor_position(self) -> FloorPosition {
        match self {
            Position::Left => FloorPosition::Left,
            Position::Single | Position::Middle => FloorPosition::Middle,
            Position::Right => FloorPosition::Right,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Single => "single",
            Position::Left => "left",
            Position::Middle => "middle",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Position::Single),
            "left" => Ok(Position::Left),
            "middle" => Ok(Position::Middle),
            "right" => Ok(Position::Right),
            other => Err(format!(
                "'{}' is not a position (expected single, left, middle or right)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdivision {
    pub name: String,
    pub code: String,
}

/// Building layout and title as exchanged with the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub position_map: BTreeMap<String, ApartmentUnit>,
    pub title: String,
}

/// Where the previous rotation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentInfo {
    pub current_floor: u32,
    pub position: FloorPosition,
    pub days_left: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub config: PlanConfig,
    pub year: u16,
    pub apartment_info: ApartmentInfo,
    /// Keyed by `D.M.YYYY`.
    pub holidays: BTreeMap<String, String>,
    pub exclude_sunday: bool,
}

/// Persisted configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedConfig {
    #[serde(flatten)]
    pub config: PlanConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<Holiday>,
}

/// Inputs of a public-holiday lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayQuery {
    pub year: u16,
    pub country_iso: String,
    pub subdivision_iso: String,
}
