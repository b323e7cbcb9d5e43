pub mod auth;
pub mod error;
pub mod navigation;
pub mod status;
pub mod weekday;
