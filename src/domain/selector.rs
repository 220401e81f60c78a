use crate::domain::apartment::ApartmentUnit;
use crate::domain::model::{ApartmentInfo, Floor, Position};
use crate::domain::registry::FloorRegistry;
use crate::utils::error::{PlannerError, Result};
use std::ops::RangeInclusive;

/// Progress of the floor → position → day selection.
///
/// Each stage carries the unit resolved when the floor was picked, so a
/// later stage can never exist without the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStage {
    #[default]
    Empty,
    Floor {
        floor: Floor,
        unit: ApartmentUnit,
    },
    Position {
        floor: Floor,
        unit: ApartmentUnit,
        position: Position,
        days_total: u8,
    },
    Day {
        floor: Floor,
        unit: ApartmentUnit,
        position: Position,
        days_total: u8,
        day: u8,
    },
}

/// Where the previous rotation stopped, kept consistent with the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastToWashSelector {
    stage: SelectionStage,
}

impl LastToWashSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SelectionStage {
        self.stage
    }

    pub fn floor(&self) -> Option<Floor> {
        match self.stage {
            SelectionStage::Empty => None,
            SelectionStage::Floor { floor, .. }
            | SelectionStage::Position { floor, .. }
            | SelectionStage::Day { floor, .. } => Some(floor),
        }
    }

    fn unit(&self) -> Option<ApartmentUnit> {
        match self.stage {
            SelectionStage::Empty => None,
            SelectionStage::Floor { unit, .. }
            | SelectionStage::Position { unit, .. }
            | SelectionStage::Day { unit, .. } => Some(unit),
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self.stage {
            SelectionStage::Position { position, .. } | SelectionStage::Day { position, .. } => {
                Some(position)
            }
            _ => None,
        }
    }

    pub fn days_total(&self) -> Option<u8> {
        match self.stage {
            SelectionStage::Position { days_total, .. }
            | SelectionStage::Day { days_total, .. } => Some(days_total),
            _ => None,
        }
    }

    pub fn day(&self) -> Option<u8> {
        match self.stage {
            SelectionStage::Day { day, .. } => Some(day),
            _ => None,
        }
    }

    /// Days of the selected apartment's turn still to come.
    pub fn days_remaining(&self) -> Option<u8> {
        match self.stage {
            SelectionStage::Day {
                days_total, day, ..
            } => Some(days_total.saturating_sub(day)),
            _ => None,
        }
    }

    /// Positions offered for the selected floor; empty without a floor.
    pub fn positions(&self) -> Vec<Position> {
        self.unit().map(|unit| unit.positions()).unwrap_or_default()
    }

    /// Days offered for the selected position; empty without a position.
    #[allow(clippy::reversed_empty_ranges)]
    pub fn day_options(&self) -> RangeInclusive<u8> {
        match self.days_total() {
            Some(total) => 1..=total,
            None => 1..=0,
        }
    }

    pub fn clear(&mut self) {
        self.stage = SelectionStage::Empty;
    }

    /// Stage 1. Resets position and day.
    pub fn select_floor(&mut self, registry: &FloorRegistry, floor: Floor) -> Result<()> {
        let unit = registry
            .get(floor)
            .copied()
            .ok_or_else(|| PlannerError::InvalidSelection {
                message: format!("floor {} does not exist", floor),
            })?;
        self.stage = SelectionStage::Floor { floor, unit };
        tracing::debug!("Last-to-wash floor set to {}", floor);
        Ok(())
    }

    /// Stage 2. Resets the day.
    pub fn select_position(&mut self, position: Position) -> Result<()> {
        let (floor, unit) = match (self.floor(), self.unit()) {
            (Some(floor), Some(unit)) => (floor, unit),
            _ => {
                return Err(PlannerError::InvalidSelection {
                    message: "choose a floor before a position".to_string(),
                })
            }
        };
        let days_total =
            unit.total_for(position)
                .ok_or_else(|| PlannerError::InvalidSelection {
                    message: format!("floor {} has no {} apartment", floor, position),
                })?;
        self.stage = SelectionStage::Position {
            floor,
            unit,
            position,
            days_total,
        };
        tracing::debug!("Last-to-wash position set to {} ({} days)", position, days_total);
        Ok(())
    }

    /// Stage 3. `day` must be one of [`Self::day_options`].
    pub fn select_day(&mut self, day: u8) -> Result<()> {
        let (floor, unit, position, days_total) = match self.stage {
            SelectionStage::Position {
                floor,
                unit,
                position,
                days_total,
            }
            | SelectionStage::Day {
                floor,
                unit,
                position,
                days_total,
                ..
            } => (floor, unit, position, days_total),
            _ => {
                return Err(PlannerError::InvalidSelection {
                    message: "choose a position before a day".to_string(),
                })
            }
        };
        if !self.day_options().contains(&day) {
            return Err(PlannerError::InvalidSelection {
                message: format!("day {} is outside 1..={}", day, days_total),
            });
        }
        self.stage = SelectionStage::Day {
            floor,
            unit,
            position,
            days_total,
            day,
        };
        Ok(())
    }

    /// Brings the selection back in line with `registry` after it changed.
    ///
    /// A vanished floor clears everything. A floor whose layout differs from
    /// the one cached at selection time keeps the floor but drops position
    /// and day, so no stale day total survives.
    pub fn revalidate(&mut self, registry: &FloorRegistry) {
        let (floor, cached) = match (self.floor(), self.unit()) {
            (Some(floor), Some(unit)) => (floor, unit),
            _ => return,
        };
        match registry.get(floor) {
            None => {
                tracing::debug!("Selected floor {} was removed; clearing selection", floor);
                self.stage = SelectionStage::Empty;
            }
            Some(live) if *live != cached => {
                tracing::debug!("Layout of floor {} changed; resetting position and day", floor);
                self.stage = SelectionStage::Floor { floor, unit: *live };
            }
            Some(_) => {}
        }
    }

    /// Scheduler input, available once all three stages are set.
    pub fn apartment_info(&self) -> Option<ApartmentInfo> {
        match self.stage {
            SelectionStage::Day {
                floor,
                position,
                days_total,
                day,
                ..
            } => Some(ApartmentInfo {
                current_floor: floor.number(),
                position: position.floor_position(),
                days_left: days_total.saturating_sub(day),
            }),
            _ => None,
        }
    }
}
