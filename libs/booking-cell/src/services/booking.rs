use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use auth_cell::SessionStore;
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ClientError;
use shared_models::navigation::{pages, Redirect};
use shared_models::status::StatusMessage;

use crate::models::{Appointment, AppointmentDraft, AppointmentRequest, BookingReceipt};

pub const BOOKED_MESSAGE: &str = "Appointment booked successfully!";

/// How long the confirmation banner stays visible before navigating away.
pub const POST_BOOKING_DELAY: Duration = Duration::from_secs(2);

const APPOINTMENTS_PATH: &str = "/appointments/";
const MY_APPOINTMENTS_PATH: &str = "/appointments/my-appointments";

pub struct BookingService {
    api: ApiClient,
    sessions: Arc<SessionStore>,
}

impl BookingService {
    pub fn new(config: &AppConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            api: ApiClient::new(config),
            sessions,
        }
    }

    /// Validate locally, then submit. A draft with a missing doctor, date,
    /// or time never reaches the network.
    pub async fn submit(&self, draft: &AppointmentDraft) -> Result<BookingReceipt, ClientError> {
        let request = draft.finalize()?;
        self.submit_request(&request).await
    }

    pub async fn submit_request(
        &self,
        request: &AppointmentRequest,
    ) -> Result<BookingReceipt, ClientError> {
        let token = self.sessions.token()?;
        debug!(
            "Booking appointment with doctor {} on {} at {}",
            request.doctor_id, request.appointment_date, request.appointment_time
        );

        let body = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;

        let result: Result<Appointment, ClientError> = self
            .api
            .request(Method::POST, APPOINTMENTS_PATH, Some(&token), Some(body))
            .await;

        match result {
            Ok(confirmation) => {
                debug!("Appointment booked: {}", confirmation.appointment_id);
                Ok(BookingReceipt {
                    confirmation,
                    status: StatusMessage::success(BOOKED_MESSAGE),
                    redirect: Redirect::after(pages::ALL_APPOINTMENTS, POST_BOOKING_DELAY),
                })
            }
            Err(err) => {
                self.sessions.clear_if_unauthorized(&err);
                Err(err)
            }
        }
    }

    /// Bookings for the logged-in user, as shown on the landing pages.
    pub async fn my_appointments(&self) -> Result<Vec<Appointment>, ClientError> {
        let token = self.sessions.token()?;

        let result = self
            .api
            .request(Method::GET, MY_APPOINTMENTS_PATH, Some(&token), None)
            .await;

        if let Err(ref err) = result {
            self.sessions.clear_if_unauthorized(err);
        }

        result
    }
}
