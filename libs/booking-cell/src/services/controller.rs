use std::sync::Arc;

use chrono::NaiveDate;

use auth_cell::SessionStore;
use shared_config::AppConfig;
use shared_models::error::ClientError;
use shared_models::navigation::Redirect;

use crate::services::availability::AvailabilityService;
use crate::services::booking::BookingService;
use crate::services::workflow::BookingWorkflow;

/// Drives the booking workflow against the remote service: every user
/// selection is applied to the state machine, the matching fetch is issued,
/// and the response is applied back through its ticket so stale responses
/// are dropped. Errors are recorded as status banners and also returned.
pub struct BookingController {
    availability: AvailabilityService,
    booking: BookingService,
    workflow: BookingWorkflow,
}

impl BookingController {
    pub fn new(config: &AppConfig, sessions: Arc<SessionStore>, today: NaiveDate) -> Self {
        Self {
            availability: AvailabilityService::new(config, Arc::clone(&sessions)),
            booking: BookingService::new(config, sessions),
            workflow: BookingWorkflow::new(today),
        }
    }

    pub fn workflow(&self) -> &BookingWorkflow {
        &self.workflow
    }

    /// Doctor (de)selection. Fetches the new doctor's availability and
    /// constrains the calendar with it.
    pub async fn doctor_changed(&mut self, doctor_id: Option<i64>) -> Result<(), ClientError> {
        let Some(ticket) = self.workflow.select_doctor(doctor_id) else {
            return Ok(());
        };

        match self.availability.doctor_availability(ticket.doctor_id).await {
            Ok(response) => {
                self.workflow.apply_availability(ticket, &response);
                Ok(())
            }
            Err(err) => {
                self.workflow.availability_failed(ticket, &err);
                Err(err)
            }
        }
    }

    /// Date selection. Fetches the remaining time slots for that date.
    pub async fn date_picked(&mut self, date: NaiveDate) -> Result<(), ClientError> {
        let ticket = match self.workflow.select_date(date) {
            Ok(ticket) => ticket,
            Err(err) => {
                self.workflow.note_error(&err);
                return Err(err);
            }
        };

        match self
            .availability
            .time_slots_for_date(ticket.doctor_id, ticket.date)
            .await
        {
            Ok(times) => {
                self.workflow.apply_time_slots(ticket, times);
                Ok(())
            }
            Err(err) => {
                self.workflow.slots_failed(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn time_picked(&mut self, time: &str) -> Result<(), ClientError> {
        self.workflow.select_time(time).map_err(|err| {
            self.workflow.note_error(&err);
            err
        })
    }

    /// Submit the booking. On success the workflow holds the confirmation
    /// banner and the delayed redirect; on failure the selection stays
    /// populated for resubmission.
    pub async fn submit(&mut self, description: &str) -> Result<Redirect, ClientError> {
        // Validation failures never enter the submitting stage.
        let request = match self.workflow.begin_submit(description) {
            Ok(request) => request,
            Err(err) => {
                self.workflow.note_error(&err);
                return Err(err);
            }
        };

        match self.booking.submit_request(&request).await {
            Ok(receipt) => {
                let redirect = receipt.redirect.clone();
                self.workflow.record_success(&receipt);
                Ok(redirect)
            }
            Err(err) => {
                self.workflow.record_failure(&err);
                Err(err)
            }
        }
    }
}
