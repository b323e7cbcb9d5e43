use std::time::Duration;

/// Page locations the client navigates between.
pub mod pages {
    pub const LOGIN_PAGE: &str = "/auth/login-page";
    pub const DOCTOR_DASHBOARD: &str = "/appointments/doctor-dashboard";
    pub const ALL_APPOINTMENTS: &str = "/appointments/all-appointments";
}

/// A planned navigation away from the current page. The booking flow keeps
/// the confirmation visible for a short delay before redirecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub delay: Duration,
}

impl Redirect {
    pub fn immediate(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(location: impl Into<String>, delay: Duration) -> Self {
        Self {
            location: location.into(),
            delay,
        }
    }
}
