pub mod availability;
pub mod booking;
pub mod calendar;
pub mod controller;
pub mod slots;
pub mod workflow;
