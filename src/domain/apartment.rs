use crate::domain::model::Position;
use serde::{Deserialize, Serialize};

/// Apartments on one floor and the number of wash days each one holds
/// before the rotation moves on.
///
/// Serialized in the scheduler's externally tagged form, e.g.
/// `{"TwoApartments": {"left_days_total": 2, "right_days_total": 1}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApartmentUnit {
    #[serde(rename = "OneApartment")]
    One { days_total: u8 },
    #[serde(rename = "TwoApartments")]
    Two {
        left_days_total: u8,
        right_days_total: u8,
    },
    #[serde(rename = "ThreeApartments")]
    Three {
        left_days_total: u8,
        middle_days_total: u8,
        right_days_total: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitDirection {
    Increase,
    Decrease,
}

impl Default for ApartmentUnit {
    fn default() -> Self {
        ApartmentUnit::one(1)
    }
}

impl ApartmentUnit {
    pub const MAX_SLOTS: usize = 3;

    pub fn one(days_total: u8) -> Self {
        ApartmentUnit::One { days_total }
    }

    pub fn two(left: u8, right: u8) -> Self {
        ApartmentUnit::Two {
            left_days_total: left,
            right_days_total: right,
        }
    }

    pub fn three(left: u8, middle: u8, right: u8) -> Self {
        ApartmentUnit::Three {
            left_days_total: left,
            middle_days_total: middle,
            right_days_total: right,
        }
    }

    pub fn slot_count(&self) -> usize {
        match self {
            ApartmentUnit::One { .. } => 1,
            ApartmentUnit::Two { .. } => 2,
            ApartmentUnit::Three { .. } => 3,
        }
    }

    /// Totals in slot order: left, middle, right.
    pub fn slot_totals(&self) -> Vec<u8> {
        match *self {
            ApartmentUnit::One { days_total } => vec![days_total],
            ApartmentUnit::Two {
                left_days_total,
                right_days_total,
            } => vec![left_days_total, right_days_total],
            ApartmentUnit::Three {
                left_days_total,
                middle_days_total,
                right_days_total,
            } => vec![left_days_total, middle_days_total, right_days_total],
        }
    }

    pub fn can_increase(&self) -> bool {
        self.slot_count() < Self::MAX_SLOTS
    }

    pub fn can_decrease(&self) -> bool {
        self.slot_count() > 1
    }

    /// Adds a slot on the right starting at one day. Existing totals shift
    /// left-to-right so nothing the user entered is lost.
    pub fn increase_units(self) -> Self {
        match self {
            ApartmentUnit::One { days_total } => ApartmentUnit::two(days_total, 1),
            ApartmentUnit::Two {
                left_days_total,
                right_days_total,
            } => ApartmentUnit::three(left_days_total, right_days_total, 1),
            three @ ApartmentUnit::Three { .. } => three,
        }
    }

    /// Drops the rightmost slot; the middle total slides into the right slot.
    pub fn decrease_units(self) -> Self {
        match self {
            one @ ApartmentUnit::One { .. } => one,
            ApartmentUnit::Two {
                left_days_total, ..
            } => ApartmentUnit::one(left_days_total),
            ApartmentUnit::Three {
                left_days_total,
                middle_days_total,
                ..
            } => ApartmentUnit::two(left_days_total, middle_days_total),
        }
    }

    pub fn adjust(self, direction: UnitDirection) -> Self {
        match direction {
            UnitDirection::Increase => self.increase_units(),
            UnitDirection::Decrease => self.decrease_units(),
        }
    }

    /// Returns a copy with `value` written to the slot at `index`.
    /// Indices past the last slot leave the unit unchanged.
    pub fn set_slot_total(self, index: usize, value: u8) -> Self {
        match (self, index) {
            (ApartmentUnit::One { .. }, 0) => ApartmentUnit::one(value),
            (
                ApartmentUnit::Two {
                    right_days_total, ..
                },
                0,
            ) => ApartmentUnit::two(value, right_days_total),
            (ApartmentUnit::Two { left_days_total, .. }, 1) => {
                ApartmentUnit::two(left_days_total, value)
            }
            (
                ApartmentUnit::Three {
                    middle_days_total,
                    right_days_total,
                    ..
                },
                0,
            ) => ApartmentUnit::three(value, middle_days_total, right_days_total),
            (
                ApartmentUnit::Three {
                    left_days_total,
                    right_days_total,
                    ..
                },
                1,
            ) => ApartmentUnit::three(left_days_total, value, right_days_total),
            (
                ApartmentUnit::Three {
                    left_days_total,
                    middle_days_total,
                    ..
                },
                2,
            ) => ApartmentUnit::three(left_days_total, middle_days_total, value),
            (unit, _) => unit,
        }
    }

    /// Positions the last-to-wash selector offers for this floor.
    pub fn positions(&self) -> Vec<Position> {
        match self {
            ApartmentUnit::One { .. } => vec![Position::Single],
            ApartmentUnit::Two { .. } => vec![Position::Left, Position::Right],
            ApartmentUnit::Three { .. } => {
                vec![Position::Left, Position::Middle, Position::Right]
            }
        }
    }

    /// Slot index of `position`, if this unit offers it.
    pub fn slot_index(&self, position: Position) -> Option<usize> {
        self.positions().iter().position(|p| *p == position)
    }

    pub fn total_for(&self, position: Position) -> Option<u8> {
        let index = self.slot_index(position)?;
        self.slot_totals().get(index).copied()
    }
}
