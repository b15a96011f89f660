/*
[INPUT]:  Email/password credentials
[OUTPUT]: Registration acknowledgement and issued session token
[POS]:    HTTP layer - account endpoints (no auth required)
[UPDATE]: When the auth gateway endpoints change
*/

use crate::http::{CloudTaskClient, Result};
use crate::types::{Acknowledgement, Credentials, LoginResponse};
use reqwest::Method;

impl CloudTaskClient {
    /// Register a new account
    ///
    /// POST /register
    pub async fn register(&self, credentials: &Credentials) -> Result<Acknowledgement> {
        let builder = self.request(Method::POST, "/register")?.json(credentials);
        self.send_ack(builder).await
    }

    /// Exchange credentials for a session token
    ///
    /// POST /login
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let builder = self.request(Method::POST, "/login")?.json(credentials);
        self.send_json(builder).await
    }
}
