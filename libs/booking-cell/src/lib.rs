pub mod models;
pub mod services;

pub use models::*;
pub use services::availability::AvailabilityService;
pub use services::booking::BookingService;
pub use services::calendar::DateConstraint;
pub use services::controller::BookingController;
pub use services::slots::TimeSlotList;
pub use services::workflow::{BookingStage, BookingWorkflow};
