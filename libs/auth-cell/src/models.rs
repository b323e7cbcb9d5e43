use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::auth::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Account fields shared by both registration flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub user_name: String,
    pub password: String,
    pub dob: NaiveDate,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCreate {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub phone: String,
}

/// Doctor profile fields, including the weekly availability the doctor
/// selects at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorCreate {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub specialization: String,
    pub available_days: Vec<String>,
    pub available_times: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRegistration {
    pub user: UserCreate,
    pub patient: PatientCreate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRegistration {
    pub user: UserCreate,
    pub doctor: DoctorCreate,
}
