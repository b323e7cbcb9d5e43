use chrono::NaiveDate;
use tracing::debug;

use shared_models::error::ClientError;
use shared_models::navigation::Redirect;
use shared_models::status::StatusMessage;

use crate::models::{
    AppointmentDraft, AppointmentRequest, AvailabilityResponse, BookingReceipt,
    MISSING_FIELDS_MESSAGE,
};
use crate::services::calendar::DateConstraint;
use crate::services::slots::TimeSlotList;

/// Observable stage of one booking widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    NoDoctor,
    DoctorSelected,
    DateConstrained,
    DateSelected,
    TimesLoaded,
    TimeSelected,
    Submitting,
    Booked,
    SubmitFailed,
}

/// Handle for an in-flight availability fetch. Carries the selection epoch
/// it was issued for, so responses that arrive after the user has moved on
/// can be discarded instead of overwriting newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityTicket {
    pub doctor_id: i64,
    epoch: u64,
}

/// Handle for an in-flight time-slot fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotsTicket {
    pub doctor_id: i64,
    pub date: NaiveDate,
    epoch: u64,
}

#[derive(Debug, Clone)]
enum Phase {
    Selecting,
    Submitting,
    Booked(Redirect),
    SubmitFailed,
}

/// State machine for the booking flow: selecting a doctor constrains
/// selectable dates, selecting a date constrains selectable times. Any
/// doctor re-selection resets everything below it.
pub struct BookingWorkflow {
    today: NaiveDate,
    epoch: u64,
    doctor_id: Option<i64>,
    calendar: Option<DateConstraint>,
    date: Option<NaiveDate>,
    slots: Option<TimeSlotList>,
    time: Option<String>,
    phase: Phase,
    status: Option<StatusMessage>,
}

impl BookingWorkflow {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            epoch: 0,
            doctor_id: None,
            calendar: None,
            date: None,
            slots: None,
            time: None,
            phase: Phase::Selecting,
            status: None,
        }
    }

    pub fn stage(&self) -> BookingStage {
        match self.phase {
            Phase::Submitting => return BookingStage::Submitting,
            Phase::Booked(_) => return BookingStage::Booked,
            Phase::SubmitFailed => return BookingStage::SubmitFailed,
            Phase::Selecting => {}
        }

        if self.doctor_id.is_none() {
            BookingStage::NoDoctor
        } else if self.calendar.is_none() {
            BookingStage::DoctorSelected
        } else if self.date.is_none() {
            BookingStage::DateConstrained
        } else if self.slots.is_none() {
            BookingStage::DateSelected
        } else if self.time.is_none() {
            BookingStage::TimesLoaded
        } else {
            BookingStage::TimeSelected
        }
    }

    /// Change the selected doctor. Clears the calendar, date, and slots;
    /// `None` (or a falsy id) deselects and disables the date field. Returns
    /// the ticket to fetch availability with, if a doctor is now selected.
    pub fn select_doctor(&mut self, doctor_id: Option<i64>) -> Option<AvailabilityTicket> {
        self.epoch += 1;
        self.calendar = None;
        self.date = None;
        self.slots = None;
        self.time = None;
        self.phase = Phase::Selecting;
        self.status = None;

        match doctor_id.filter(|id| *id > 0) {
            Some(id) => {
                debug!("Doctor selected: {}", id);
                self.doctor_id = Some(id);
                Some(AvailabilityTicket {
                    doctor_id: id,
                    epoch: self.epoch,
                })
            }
            None => {
                debug!("Doctor deselected");
                self.doctor_id = None;
                None
            }
        }
    }

    /// Apply a fetched availability response. Returns false (and changes
    /// nothing) when the response is stale.
    pub fn apply_availability(
        &mut self,
        ticket: AvailabilityTicket,
        response: &AvailabilityResponse,
    ) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                "Discarding stale availability response for doctor {}",
                ticket.doctor_id
            );
            return false;
        }

        self.calendar = Some(DateConstraint::new(&response.available_days, self.today));
        true
    }

    /// Record a failed availability fetch. Prior state stays untouched;
    /// stale failures are dropped silently.
    pub fn availability_failed(&mut self, ticket: AvailabilityTicket, err: &ClientError) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.status = Some(err.status_message());
        true
    }

    /// Pick a date. Rejected unless the current constraint enables it.
    /// Returns the ticket to fetch time slots with.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<SlotsTicket, ClientError> {
        let doctor_id = self
            .doctor_id
            .ok_or_else(|| ClientError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;
        let calendar = self
            .calendar
            .as_ref()
            .ok_or_else(|| ClientError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

        if !calendar.is_selectable(date) {
            return Err(ClientError::Validation(format!(
                "Date {} is not available for this doctor",
                date
            )));
        }

        self.epoch += 1;
        self.date = Some(date);
        self.slots = None;
        self.time = None;
        self.phase = Phase::Selecting;
        self.status = None;

        Ok(SlotsTicket {
            doctor_id,
            date,
            epoch: self.epoch,
        })
    }

    /// Apply fetched time slots. An empty list is a notice, not an error.
    /// Returns false (and changes nothing) when the response is stale.
    pub fn apply_time_slots(&mut self, ticket: SlotsTicket, times: Vec<String>) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                "Discarding stale time slots for doctor {} on {}",
                ticket.doctor_id, ticket.date
            );
            return false;
        }

        let slots = TimeSlotList::from_times(times);
        self.status = slots.status();
        self.slots = Some(slots);
        true
    }

    /// Record a failed time-slot fetch, unless stale.
    pub fn slots_failed(&mut self, ticket: SlotsTicket, err: &ClientError) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.status = Some(err.status_message());
        true
    }

    /// Pick a time from the loaded slot list.
    pub fn select_time(&mut self, time: &str) -> Result<(), ClientError> {
        let slots = self
            .slots
            .as_ref()
            .ok_or_else(|| ClientError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

        if !slots.contains(time) {
            return Err(ClientError::Validation(format!(
                "Time {} is not available on the selected date",
                time
            )));
        }

        self.time = Some(time.to_string());
        // A changed selection leaves any earlier failed submission behind.
        self.phase = Phase::Selecting;
        Ok(())
    }

    /// The booking form as currently filled in.
    pub fn draft(&self, description: impl Into<String>) -> AppointmentDraft {
        AppointmentDraft {
            doctor_id: self.doctor_id,
            appointment_date: self.date,
            appointment_time: self.time.clone(),
            description: description.into(),
        }
    }

    /// Validate the full selection and enter the submitting stage.
    pub fn begin_submit(&mut self, description: &str) -> Result<AppointmentRequest, ClientError> {
        let request = self.draft(description).finalize()?;
        self.phase = Phase::Submitting;
        Ok(request)
    }

    pub fn record_success(&mut self, receipt: &BookingReceipt) {
        self.status = Some(receipt.status.clone());
        self.phase = Phase::Booked(receipt.redirect.clone());
    }

    /// The selection is retained so the user can resubmit.
    pub fn record_failure(&mut self, err: &ClientError) {
        self.status = Some(err.status_message());
        self.phase = Phase::SubmitFailed;
    }

    /// Surface an error banner without touching the selection.
    pub fn note_error(&mut self, err: &ClientError) {
        self.status = Some(err.status_message());
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.doctor_id
    }

    /// `None` while no doctor is selected: the date field is disabled.
    pub fn calendar(&self) -> Option<&DateConstraint> {
        self.calendar.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slots(&self) -> Option<&TimeSlotList> {
        self.slots.as_ref()
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Set once the booking is confirmed.
    pub fn redirect(&self) -> Option<&Redirect> {
        match &self.phase {
            Phase::Booked(redirect) => Some(redirect),
            _ => None,
        }
    }
}
