use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::warn;

use shared_models::weekday::parse_weekday;

/// Date-picker constraint derived from a doctor's available weekdays. A new
/// constraint replaces the previous one wholesale, so predicates never stack
/// across doctor changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConstraint {
    enabled_weekdays: HashSet<Weekday>,
    min_date: NaiveDate,
}

impl DateConstraint {
    /// Unknown weekday names are ignored; the minimum selectable date is
    /// `today`.
    pub fn new(day_names: &[String], today: NaiveDate) -> Self {
        let mut enabled_weekdays = HashSet::new();
        for name in day_names {
            match parse_weekday(name) {
                Some(weekday) => {
                    enabled_weekdays.insert(weekday);
                }
                None => warn!("Ignoring unknown weekday name: {}", name),
            }
        }

        Self {
            enabled_weekdays,
            min_date: today,
        }
    }

    /// A date is selectable iff its weekday is enabled and it is not in the
    /// past.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.min_date && self.enabled_weekdays.contains(&date.weekday())
    }

    /// The next selectable date on or after the minimum, if any weekday is
    /// enabled at all.
    pub fn first_selectable(&self) -> Option<NaiveDate> {
        (0..7)
            .map(|offset| self.min_date + Duration::days(offset))
            .find(|date| self.is_selectable(*date))
    }

    /// Selectable dates within the next `horizon_days` days, for rendering.
    pub fn selectable_through(&self, horizon_days: u32) -> Vec<NaiveDate> {
        (0..i64::from(horizon_days))
            .map(|offset| self.min_date + Duration::days(offset))
            .filter(|date| self.is_selectable(*date))
            .collect()
    }

    pub fn has_enabled_days(&self) -> bool {
        !self.enabled_weekdays.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }
}
