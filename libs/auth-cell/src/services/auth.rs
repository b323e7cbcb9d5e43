use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::{Session, TokenResponse, UserRole};
use shared_models::error::ClientError;
use shared_models::navigation::{pages, Redirect};

use crate::models::{DoctorRegistration, LoginRequest, PatientRegistration};
use crate::services::session::SessionStore;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please fill in all fields";

const LOGIN_PATH: &str = "/auth/login";

pub struct AuthService {
    api: ApiClient,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(config: &AppConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            api: ApiClient::new(config),
            sessions,
        }
    }

    /// Submit credentials, store the issued session, and return the landing
    /// page for the user's role. Empty fields fail before any network call.
    pub async fn login(&self, request: &LoginRequest) -> Result<Redirect, ClientError> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(ClientError::Validation(
                MISSING_CREDENTIALS_MESSAGE.to_string(),
            ));
        }

        debug!("Logging in user: {}", request.username);

        let token: TokenResponse = self
            .api
            .post_form(
                LOGIN_PATH,
                &[
                    ("username", request.username.as_str()),
                    ("password", request.password.as_str()),
                ],
            )
            .await?;

        let role = token.role;
        self.sessions.set(Session::from(token));

        Ok(Redirect::immediate(landing_page(role)))
    }

    pub fn logout(&self) {
        self.sessions.clear();
    }

    pub async fn register_patient(
        &self,
        registration: &PatientRegistration,
    ) -> Result<Redirect, ClientError> {
        debug!("Registering patient: {}", registration.user.user_name);
        self.register(UserRole::Patient, serde_json::to_value(registration))
            .await
    }

    pub async fn register_doctor(
        &self,
        registration: &DoctorRegistration,
    ) -> Result<Redirect, ClientError> {
        debug!("Registering doctor: {}", registration.user.user_name);
        self.register(UserRole::Doctor, serde_json::to_value(registration))
            .await
    }

    async fn register(
        &self,
        role: UserRole,
        body: Result<Value, serde_json::Error>,
    ) -> Result<Redirect, ClientError> {
        let body = body.map_err(|e| ClientError::Decode(e.to_string()))?;
        let path = format!("/auth/register/{}", role.as_str());

        let _: Value = self.api.request(Method::POST, &path, None, Some(body)).await?;

        Ok(Redirect::immediate(pages::LOGIN_PAGE))
    }
}

/// Doctors land on their dashboard; everyone else on the appointment list.
pub fn landing_page(role: UserRole) -> &'static str {
    match role {
        UserRole::Doctor => pages::DOCTOR_DASHBOARD,
        UserRole::Patient => pages::ALL_APPOINTMENTS,
    }
}
