use std::collections::HashSet;

use chrono::Weekday;

use shared_models::weekday::weekday_name;

/// Weekdays offered on the doctor sign-up form, in display order.
pub const REGISTRATION_WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Start hours offered on the doctor sign-up form (9:00 through 17:00).
pub const FIRST_BOOKABLE_HOUR: u32 = 9;
pub const LAST_BOOKABLE_HOUR: u32 = 17;

/// Weekday names for the registration payload, filtered to the form's
/// Monday-Friday choices and kept in weekday order.
pub fn selected_day_names(selected: &HashSet<Weekday>) -> Vec<String> {
    REGISTRATION_WEEKDAYS
        .iter()
        .filter(|day| selected.contains(*day))
        .map(|day| weekday_name(*day).to_string())
        .collect()
}

/// Hour-granular time labels for the registration payload ("9:00", "10:00",
/// ...), kept in ascending hour order.
pub fn selected_time_labels(selected: &HashSet<u32>) -> Vec<String> {
    (FIRST_BOOKABLE_HOUR..=LAST_BOOKABLE_HOUR)
        .filter(|hour| selected.contains(hour))
        .map(|hour| format!("{}:00", hour))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_names_keep_weekday_order() {
        let selected: HashSet<Weekday> =
            [Weekday::Fri, Weekday::Mon, Weekday::Wed].into_iter().collect();
        assert_eq!(
            selected_day_names(&selected),
            vec!["Monday", "Wednesday", "Friday"]
        );
    }

    #[test]
    fn weekend_selections_are_not_offered() {
        let selected: HashSet<Weekday> = [Weekday::Sat, Weekday::Sun].into_iter().collect();
        assert!(selected_day_names(&selected).is_empty());
    }

    #[test]
    fn time_labels_cover_working_hours_only() {
        let selected: HashSet<u32> = [8, 9, 12, 17, 18].into_iter().collect();
        assert_eq!(selected_time_labels(&selected), vec!["9:00", "12:00", "17:00"]);
    }
}
