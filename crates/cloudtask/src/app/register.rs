/*
[INPUT]:  Email/password typed by the user, redirect delay
[OUTPUT]: Confirmation or failure line, delayed jump to login
[POS]:    App layer - registration page controller
[UPDATE]: When registration messages or flow change
*/

use std::time::Duration;

use cloudtask_client::{AuthGateway, CloudTaskError, Credentials};

use crate::app::{Navigator, Route};

pub const REGISTERED: &str = "Registered successfully. Please login.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const EMAIL_TAKEN: &str = "Email already registered.";

/// Navigation that happens after the user has had time to read a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the page only navigates when the redirect is followed"]
pub struct PendingRedirect {
    pub to: Route,
    pub after: Duration,
}

impl PendingRedirect {
    /// Wait out the delay, then navigate
    pub async fn follow(self, navigator: &mut Navigator) {
        tokio::time::sleep(self.after).await;
        navigator.navigate(self.to);
    }
}

/// View model for `/register`
#[derive(Debug)]
pub struct RegisterPage {
    gateway: AuthGateway,
    email: String,
    password: String,
    message: Option<String>,
    redirect_delay: Duration,
}

impl RegisterPage {
    pub fn new(gateway: AuthGateway, redirect_delay: Duration) -> Self {
        Self {
            gateway,
            email: String::new(),
            password: String::new(),
            message: None,
            redirect_delay,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit the form
    ///
    /// On success the confirmation is set and a redirect to login is
    /// returned; the caller shows the message, then follows it.
    pub async fn submit(&mut self) -> Option<PendingRedirect> {
        let credentials = Credentials::new(self.email.trim(), std::mem::take(&mut self.password));

        match self.gateway.register(&credentials).await {
            Ok(_) => {
                self.message = Some(REGISTERED.to_string());
                Some(PendingRedirect {
                    to: Route::Login,
                    after: self.redirect_delay,
                })
            }
            Err(err) => {
                tracing::warn!(email = %credentials.email, error = %err, "registration failed");
                let message = match &err {
                    CloudTaskError::Api { code: 409, .. } => EMAIL_TAKEN,
                    _ => REGISTRATION_FAILED,
                };
                self.message = Some(message.to_string());
                None
            }
        }
    }
}
