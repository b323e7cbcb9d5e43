use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use auth_cell::SessionStore;
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::error::ClientError;

use crate::models::AvailabilityResponse;

/// Fetches a doctor's bookable weekdays and, for a chosen date, the
/// remaining time slots. Failures are terminal for the interaction: no
/// retry, the caller shows the error and keeps its prior state.
pub struct AvailabilityService {
    api: ApiClient,
    sessions: Arc<SessionStore>,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            api: ApiClient::new(config),
            sessions,
        }
    }

    pub async fn doctor_availability(
        &self,
        doctor_id: i64,
    ) -> Result<AvailabilityResponse, ClientError> {
        debug!("Fetching availability for doctor: {}", doctor_id);
        self.fetch(doctor_id, None).await
    }

    pub async fn time_slots_for_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<String>, ClientError> {
        debug!("Fetching time slots for doctor {} on {}", doctor_id, date);
        let response = self.fetch(doctor_id, Some(date)).await?;
        Ok(response.available_times)
    }

    async fn fetch(
        &self,
        doctor_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<AvailabilityResponse, ClientError> {
        let token = self.sessions.token()?;
        let path = format!("/appointments/doctors/{}/availability", doctor_id);

        let mut query = Vec::new();
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }

        let result = self
            .api
            .request_with_query(Method::GET, &path, Some(&token), None, &query)
            .await;

        if let Err(ref err) = result {
            self.sessions.clear_if_unauthorized(err);
        }

        result
    }
}
