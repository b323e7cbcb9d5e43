use shared_models::status::StatusMessage;

pub const NO_SLOTS_MESSAGE: &str = "No available time slots for selected date";

/// The selectable time options for a chosen date. Rendering replaces all
/// prior options; the placeholder entry is implicit and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlotList {
    options: Vec<String>,
}

impl TimeSlotList {
    /// Deduplicate and sort labels in ascending lexical order.
    pub fn from_times(times: Vec<String>) -> Self {
        let mut options = times;
        options.sort();
        options.dedup();
        Self { options }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|option| option == label)
    }

    /// An empty result is not an error, just a notice.
    pub fn status(&self) -> Option<StatusMessage> {
        if self.is_empty() {
            Some(StatusMessage::info(NO_SLOTS_MESSAGE))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::status::Severity;

    #[test]
    fn options_are_sorted_ascending() {
        let slots = TimeSlotList::from_times(vec![
            "14:00".to_string(),
            "09:00".to_string(),
            "11:00".to_string(),
        ]);
        assert_eq!(slots.options(), ["09:00", "11:00", "14:00"]);
    }

    #[test]
    fn duplicate_labels_collapse() {
        let slots = TimeSlotList::from_times(vec![
            "10:00".to_string(),
            "10:00".to_string(),
            "12:00".to_string(),
        ]);
        assert_eq!(slots.options(), ["10:00", "12:00"]);
    }

    #[test]
    fn empty_result_is_a_notice_not_an_error() {
        let slots = TimeSlotList::from_times(vec![]);
        assert!(slots.is_empty());

        let status = slots.status().unwrap();
        assert_eq!(status.text, NO_SLOTS_MESSAGE);
        assert_eq!(status.severity, Severity::Info);
        assert!(!status.is_error());
    }

    #[test]
    fn populated_list_has_no_status() {
        let slots = TimeSlotList::from_times(vec!["09:00".to_string()]);
        assert_eq!(slots.status(), None);
        assert!(slots.contains("09:00"));
        assert!(!slots.contains("10:00"));
    }
}
