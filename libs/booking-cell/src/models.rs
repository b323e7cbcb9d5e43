use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shared_models::error::ClientError;
use shared_models::navigation::Redirect;
use shared_models::status::StatusMessage;

pub const MISSING_FIELDS_MESSAGE: &str = "Please select doctor, date and time";

/// Response body of `GET /appointments/doctors/{id}/availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available_days: Vec<String>,
    pub available_times: Vec<String>,
}

/// The booking form as the user fills it in. Everything except the
/// description must be chosen before submission is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub doctor_id: Option<i64>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<String>,
    pub description: String,
}

impl AppointmentDraft {
    /// A doctor id of 0 (or negative) counts as "no doctor selected".
    pub fn finalize(&self) -> Result<AppointmentRequest, ClientError> {
        let doctor_id = self.doctor_id.filter(|id| *id > 0);

        match (doctor_id, self.appointment_date, self.appointment_time.as_deref()) {
            (Some(doctor_id), Some(appointment_date), Some(appointment_time))
                if !appointment_time.is_empty() =>
            {
                Ok(AppointmentRequest {
                    doctor_id,
                    appointment_date,
                    appointment_time: appointment_time.to_string(),
                    description: self.description.clone(),
                })
            }
            _ => Err(ClientError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Request body of `POST /appointments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub description: String,
}

/// A booked appointment as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub appointment_date: NaiveDateTime,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub prescription: Option<String>,
}

/// Outcome of a successful booking: the confirmation, the banner to show,
/// and the delayed navigation to the appointment list.
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub confirmation: Appointment,
    pub status: StatusMessage,
    pub redirect: Redirect,
}
