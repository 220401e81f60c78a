use crate::domain::apartment::{ApartmentUnit, UnitDirection};
use crate::domain::model::Floor;
use crate::utils::error::{PlannerError, Result};
use std::collections::BTreeMap;

/// Ordered floor layout of a building.
///
/// Invariants held after every operation:
/// - at least one floor exists;
/// - numbered floors run contiguously from 1;
/// - the ground floor, when present, is the lowest key.
///
/// Requests that would break these are no-ops rather than errors; the
/// surface is expected to disable them (see [`FloorRegistry::can_remove_row`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorRegistry {
    floors: BTreeMap<Floor, ApartmentUnit>,
}

impl Default for FloorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorRegistry {
    /// A building with a single-apartment ground floor.
    pub fn new() -> Self {
        let mut floors = BTreeMap::new();
        floors.insert(Floor::Ground, ApartmentUnit::default());
        Self { floors }
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn get(&self, floor: Floor) -> Option<&ApartmentUnit> {
        self.floors.get(&floor)
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.floors.contains_key(&floor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Floor, &ApartmentUnit)> {
        self.floors.iter().map(|(floor, unit)| (*floor, unit))
    }

    pub fn floors(&self) -> Vec<Floor> {
        self.floors.keys().copied().collect()
    }

    pub fn has_ground_floor(&self) -> bool {
        self.floors.contains_key(&Floor::Ground)
    }

    fn highest(&self) -> (Floor, ApartmentUnit) {
        self.floors
            .iter()
            .next_back()
            .map(|(floor, unit)| (*floor, *unit))
            .unwrap_or((Floor::Ground, ApartmentUnit::default()))
    }

    pub fn can_remove_row(&self) -> bool {
        self.floors.len() > 1
    }

    /// Adds the floor above the current top floor with a copy of its layout.
    pub fn append_row(&mut self) -> Floor {
        let (top, unit) = self.highest();
        let added = top.next();
        self.floors.insert(added, unit);
        tracing::debug!("Appended floor {} ({} floors)", added, self.floors.len());
        added
    }

    /// Removes the top floor unless it is the only one.
    pub fn remove_row(&mut self) -> Option<Floor> {
        if !self.can_remove_row() {
            tracing::debug!("Ignoring row removal on a single-floor building");
            return None;
        }
        let (top, _) = self.highest();
        self.floors.remove(&top);
        tracing::debug!("Removed floor {} ({} floors)", top, self.floors.len());
        Some(top)
    }

    /// Adds or removes the ground floor. Returns whether the layout changed.
    pub fn set_ground_floor(&mut self, present: bool) -> bool {
        if present {
            if self.has_ground_floor() {
                return false;
            }
            self.floors.insert(Floor::Ground, ApartmentUnit::default());
            return true;
        }

        if self.floors.remove(&Floor::Ground).is_none() {
            return false;
        }
        if self.floors.is_empty() {
            self.floors.insert(Floor::Upper(1), ApartmentUnit::default());
        }
        true
    }

    /// Whether writing to `floor` keeps the layout contiguous.
    fn admits(&self, floor: Floor) -> bool {
        if self.floors.contains_key(&floor) {
            return true;
        }
        match floor {
            Floor::Ground => true,
            upper => upper == self.highest().0.next(),
        }
    }

    fn unit_or_default(&self, floor: Floor) -> ApartmentUnit {
        self.floors.get(&floor).copied().unwrap_or_default()
    }

    fn write(&mut self, floor: Floor, unit: ApartmentUnit) -> bool {
        if !self.admits(floor) {
            tracing::warn!("Ignoring write to floor {} outside the building", floor);
            return false;
        }
        let previous = self.floors.insert(floor, unit);
        previous != Some(unit)
    }

    /// Replaces the layout of `floor`. Returns whether the registry changed.
    pub fn set_unit(&mut self, floor: Floor, unit: ApartmentUnit) -> bool {
        self.write(floor, unit)
    }

    pub fn adjust_unit_count(&mut self, floor: Floor, direction: UnitDirection) -> bool {
        let unit = self.unit_or_default(floor).adjust(direction);
        self.write(floor, unit)
    }

    pub fn set_slot_total(&mut self, floor: Floor, index: usize, days: u8) -> bool {
        let unit = self.unit_or_default(floor).set_slot_total(index, days);
        self.write(floor, unit)
    }

    pub fn to_position_map(&self) -> BTreeMap<String, ApartmentUnit> {
        self.floors
            .iter()
            .map(|(floor, unit)| (floor.key(), *unit))
            .collect()
    }

    /// Rebuilds a registry from a persisted `position_map`, rejecting
    /// layouts that break the registry invariants.
    pub fn from_position_map(position_map: &BTreeMap<String, ApartmentUnit>) -> Result<Self> {
        let mut floors = BTreeMap::new();
        for (key, unit) in position_map {
            let number: u32 = key.trim().parse().map_err(|_| PlannerError::InvalidBuilding {
                message: format!("floor key '{}' is not a number", key),
            })?;
            if floors.insert(Floor::from_number(number), *unit).is_some() {
                return Err(PlannerError::InvalidBuilding {
                    message: format!("floor {} appears more than once", number),
                });
            }
        }

        if floors.is_empty() {
            return Err(PlannerError::InvalidBuilding {
                message: "the building has no floors".to_string(),
            });
        }

        let mut expected = 1;
        for floor in floors.keys() {
            if let Floor::Upper(n) = floor {
                if *n != expected {
                    return Err(PlannerError::InvalidBuilding {
                        message: format!("floor {} is missing", expected),
                    });
                }
                expected += 1;
            }
        }

        Ok(Self { floors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_of(entries: &[(Floor, ApartmentUnit)]) -> FloorRegistry {
        let map = entries
            .iter()
            .map(|(floor, unit)| (floor.key(), *unit))
            .collect();
        FloorRegistry::from_position_map(&map).unwrap()
    }

    #[test]
    fn test_new_registry_has_ground_floor() {
        let registry = FloorRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Floor::Ground), Some(&ApartmentUnit::one(1)));
        assert!(!registry.can_remove_row());
    }

    #[test]
    fn test_append_row_copies_top_layout() {
        let mut registry = FloorRegistry::new();
        registry.adjust_unit_count(Floor::Ground, UnitDirection::Increase);
        assert_eq!(registry.append_row(), Floor::Upper(1));
        assert_eq!(registry.append_row(), Floor::Upper(2));
        assert_eq!(registry.get(Floor::Upper(2)), Some(&ApartmentUnit::two(1, 1)));

        registry.set_slot_total(Floor::Upper(2), 0, 3);
        assert_eq!(registry.get(Floor::Upper(1)), Some(&ApartmentUnit::two(1, 1)));
        assert!(registry.can_remove_row());
    }

    #[test]
    fn test_remove_row_never_empties_registry() {
        let mut registry = FloorRegistry::new();
        registry.append_row();
        assert_eq!(registry.remove_row(), Some(Floor::Upper(1)));
        assert_eq!(registry.remove_row(), None);
        assert_eq!(registry.len(), 1);
        assert!(registry.has_ground_floor());
    }

    #[test]
    fn test_ground_toggle_on_sole_ground_floor() {
        let mut registry = FloorRegistry::new();
        assert!(registry.set_ground_floor(false));
        assert_eq!(registry.floors(), vec![Floor::Upper(1)]);
        assert_eq!(registry.get(Floor::Upper(1)), Some(&ApartmentUnit::one(1)));

        assert!(registry.set_ground_floor(true));
        assert_eq!(registry.floors(), vec![Floor::Ground, Floor::Upper(1)]);
    }

    #[test]
    fn test_ground_toggle_preserves_upper_floors() {
        let mut registry = registry_of(&[
            (Floor::Upper(1), ApartmentUnit::two(2, 3)),
            (Floor::Upper(2), ApartmentUnit::three(1, 2, 3)),
        ]);
        let before: Vec<_> = registry.iter().map(|(f, u)| (f, *u)).collect();

        assert!(registry.set_ground_floor(true));
        assert!(!registry.set_ground_floor(true));
        assert!(registry.set_ground_floor(false));

        let after: Vec<_> = registry.iter().map(|(f, u)| (f, *u)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_enabling_ground_keeps_existing_ground_layout() {
        let mut registry = registry_of(&[(Floor::Ground, ApartmentUnit::two(2, 2))]);
        assert!(!registry.set_ground_floor(true));
        assert_eq!(registry.get(Floor::Ground), Some(&ApartmentUnit::two(2, 2)));
    }

    #[test]
    fn test_absent_floor_is_defaulted_only_when_contiguous() {
        let mut registry = FloorRegistry::new();

        assert!(registry.adjust_unit_count(Floor::Upper(1), UnitDirection::Increase));
        assert_eq!(registry.get(Floor::Upper(1)), Some(&ApartmentUnit::two(1, 1)));

        assert!(!registry.adjust_unit_count(Floor::Upper(5), UnitDirection::Increase));
        assert!(!registry.contains(Floor::Upper(5)));
    }

    #[test]
    fn test_set_slot_total_out_of_range_is_noop() {
        let mut registry = FloorRegistry::new();
        assert!(!registry.set_slot_total(Floor::Ground, 2, 3));
        assert_eq!(registry.get(Floor::Ground), Some(&ApartmentUnit::one(1)));
    }

    #[test]
    fn test_size_stays_positive_under_any_row_sequence() {
        let mut registry = FloorRegistry::new();
        let steps: [fn(&mut FloorRegistry); 5] = [
            |r| {
                r.remove_row();
            },
            |r| {
                r.set_ground_floor(false);
            },
            |r| {
                r.append_row();
            },
            |r| {
                r.set_ground_floor(true);
            },
            |r| {
                r.remove_row();
            },
        ];
        for round in 0..4 {
            for (i, step) in steps.iter().enumerate() {
                if (round + i) % 3 != 0 {
                    step(&mut registry);
                }
                assert!(registry.len() >= 1);
                assert!(FloorRegistry::from_position_map(&registry.to_position_map()).is_ok());
            }
        }
    }

    #[test]
    fn test_position_map_round_trip() {
        let registry = registry_of(&[
            (Floor::Ground, ApartmentUnit::one(2)),
            (Floor::Upper(1), ApartmentUnit::two(1, 3)),
        ]);
        let map = registry.to_position_map();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["0", "1"]);
        assert_eq!(FloorRegistry::from_position_map(&map).unwrap(), registry);
    }

    #[test]
    fn test_from_position_map_rejects_gaps_and_junk() {
        let mut gapped = BTreeMap::new();
        gapped.insert("1".to_string(), ApartmentUnit::one(1));
        gapped.insert("3".to_string(), ApartmentUnit::one(1));
        assert!(matches!(
            FloorRegistry::from_position_map(&gapped),
            Err(PlannerError::InvalidBuilding { .. })
        ));

        let mut junk = BTreeMap::new();
        junk.insert("roof".to_string(), ApartmentUnit::one(1));
        assert!(FloorRegistry::from_position_map(&junk).is_err());

        assert!(FloorRegistry::from_position_map(&BTreeMap::new()).is_err());
    }
}
