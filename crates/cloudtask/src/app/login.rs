/*
[INPUT]:  Email/password typed by the user
[OUTPUT]: Established session and a jump to the dashboard, or an error line
[POS]:    App layer - login page controller
[UPDATE]: When login messages or flow change
*/

use cloudtask_client::{AuthGateway, CloudTaskError, Credentials, ErrorKind};

use crate::app::{Navigator, Route};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_UNAVAILABLE: &str = "Login unavailable, try again later.";
pub const SESSION_NOT_SAVED: &str = "Could not save session.";

/// View model for `/`
#[derive(Debug)]
pub struct LoginPage {
    gateway: AuthGateway,
    email: String,
    password: String,
    error: Option<String>,
}

impl LoginPage {
    pub fn new(gateway: AuthGateway) -> Self {
        Self {
            gateway,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message shown under the form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form
    ///
    /// Success stores the token and moves to the dashboard. Failure stays on
    /// this page with a message; the password field is emptied either way.
    pub async fn submit(&mut self, navigator: &mut Navigator) {
        let credentials = Credentials::new(self.email.trim(), std::mem::take(&mut self.password));

        match self.gateway.login(&credentials).await {
            Ok(session) => {
                tracing::info!(email = %session.email, "login succeeded");
                self.error = None;
                navigator.navigate(Route::Dashboard);
            }
            Err(err) => {
                tracing::warn!(email = %credentials.email, error = %err, "login failed");
                let message = match (&err, err.kind()) {
                    // the server accepted the credentials, only the local write failed
                    (CloudTaskError::Storage(_), _) => SESSION_NOT_SAVED,
                    (_, ErrorKind::Unauthorized | ErrorKind::Client) => INVALID_CREDENTIALS,
                    (_, ErrorKind::Network | ErrorKind::Server) => LOGIN_UNAVAILABLE,
                };
                self.error = Some(message.to_string());
            }
        }
    }
}
