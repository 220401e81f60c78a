use crate::domain::model::Holiday;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Dates excluded from the rotation, ascending, one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    entries: Vec<Holiday>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Holiday] {
        &self.entries
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|holiday| holiday.date == date)
    }

    pub fn can_insert(&self, date: NaiveDate) -> bool {
        !self.contains(date)
    }

    /// Adds a holiday picked by hand. Dates already present are refused.
    pub fn insert_manual(&mut self, date: NaiveDate, name: impl Into<String>) -> bool {
        if !self.can_insert(date) {
            tracing::debug!("Holiday on {} already listed", date);
            return false;
        }
        self.entries.push(Holiday::new(date, name));
        self.entries.sort_by_key(|holiday| holiday.date);
        true
    }

    /// Merges holidays from a lookup; incoming names win on shared dates.
    /// Returns the number of dates that were not listed before.
    pub fn merge_from_source<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Holiday>,
    {
        let mut by_date: BTreeMap<NaiveDate, String> = self
            .entries
            .drain(..)
            .map(|holiday| (holiday.date, holiday.name))
            .collect();
        let before = by_date.len();
        for holiday in incoming {
            by_date.insert(holiday.date, holiday.name);
        }
        let added = by_date.len() - before;
        self.entries = by_date
            .into_iter()
            .map(|(date, name)| Holiday { date, name })
            .collect();
        added
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        let before = self.entries.len();
        self.entries.retain(|holiday| holiday.date != date);
        self.entries.len() != before
    }

    /// Scheduler form: `D.M.YYYY` without zero padding.
    pub fn to_wire(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|holiday| (wire_date(holiday.date), holiday.name.clone()))
            .collect()
    }
}

pub fn wire_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_manual_inserts_are_sorted() {
        let mut set = HolidaySet::new();
        assert!(set.insert_manual(date(2024, 12, 25), "Christmas"));
        assert!(set.insert_manual(date(2024, 1, 1), "NewYear"));

        let entries: Vec<_> = set.iter().map(|h| (h.date, h.name.as_str())).collect();
        assert_eq!(
            entries,
            vec![(date(2024, 1, 1), "NewYear"), (date(2024, 12, 25), "Christmas")]
        );
    }

    #[test]
    fn test_manual_insert_refuses_duplicate_date() {
        let mut set = HolidaySet::new();
        set.insert_manual(date(2024, 5, 1), "Labour Day");
        assert!(!set.can_insert(date(2024, 5, 1)));
        assert!(!set.insert_manual(date(2024, 5, 1), "Other"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].name, "Labour Day");
    }

    #[test]
    fn test_merge_overwrites_and_adds() {
        let mut set = HolidaySet::new();
        set.insert_manual(date(2024, 12, 24), "Eve");
        set.insert_manual(date(2024, 10, 3), "Mine");

        let added = set.merge_from_source(vec![
            Holiday::new(date(2024, 10, 3), "Tag der Deutschen Einheit"),
            Holiday::new(date(2024, 1, 1), "Neujahr"),
        ]);

        assert_eq!(added, 1);
        let entries: Vec<_> = set.iter().map(|h| (h.date, h.name.as_str())).collect();
        assert_eq!(
            entries,
            vec![
                (date(2024, 1, 1), "Neujahr"),
                (date(2024, 10, 3), "Tag der Deutschen Einheit"),
                (date(2024, 12, 24), "Eve"),
            ]
        );
    }

    #[test]
    fn test_merge_deduplicates_incoming_dates() {
        let mut set = HolidaySet::new();
        set.merge_from_source(vec![
            Holiday::new(date(2024, 4, 1), "First"),
            Holiday::new(date(2024, 4, 1), "Second"),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].name, "Second");
    }

    #[test]
    fn test_remove_matches_calendar_value() {
        let mut set = HolidaySet::new();
        set.insert_manual(date(2024, 12, 25), "Christmas");
        assert!(set.remove(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(!set.remove(date(2024, 12, 25)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_wire_dates_are_unpadded() {
        let mut set = HolidaySet::new();
        set.insert_manual(date(2025, 1, 6), "Heilige Drei Könige");
        let wire = set.to_wire();
        assert_eq!(wire.get("6.1.2025").map(String::as_str), Some("Heilige Drei Könige"));
    }
}
