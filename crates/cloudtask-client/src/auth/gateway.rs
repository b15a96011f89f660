/*
[INPUT]:  HTTP client, session context, user credentials
[OUTPUT]: Registered accounts and an established session
[POS]:    Auth layer - orchestrates register/login/logout
[UPDATE]: When auth endpoints or flow steps change
*/

use crate::auth::{Session, SessionContext};
use crate::http::{CloudTaskClient, CloudTaskError, Result};
use crate::types::{Acknowledgement, Credentials};

/// Client side of the backend's register/login endpoint pair
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: CloudTaskClient,
    session: SessionContext,
}

impl AuthGateway {
    pub fn new(client: CloudTaskClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &CloudTaskClient {
        &self.client
    }

    /// Session this gateway writes into
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Create an account; does not log in
    pub async fn register(&self, credentials: &Credentials) -> Result<Acknowledgement> {
        let ack = self.client.register(credentials).await?;
        tracing::info!(email = %credentials.email, "account registered");
        Ok(ack)
    }

    /// Complete login flow
    ///
    /// 1. POST credentials
    /// 2. Reject an empty token
    /// 3. Persist the token in the session context
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let response = self.client.login(credentials).await?;

        if response.token.trim().is_empty() {
            return Err(CloudTaskError::InvalidResponse(
                "login response carried an empty token".to_string(),
            ));
        }

        self.session
            .establish(response.token, &credentials.email)
            .await
    }

    /// Forget the session locally; the backend keeps no session state
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::{ClientConfig, ErrorKind};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> AuthGateway {
        let client =
            CloudTaskClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .unwrap();
        AuthGateway::new(client, SessionContext::in_memory())
    }

    #[tokio::test]
    async fn test_login_happy_path_stores_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "email": "a@b.c",
                "password": "pw",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-token",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let session = gateway
            .login(&Credentials::new("a@b.c", "pw"))
            .await
            .unwrap();

        assert_eq!(session.token, "jwt-token");
        assert_eq!(session.email, "a@b.c");
        assert_eq!(gateway.session().token(), Some("jwt-token".to_string()));
    }

    #[tokio::test]
    async fn test_login_rejected_keeps_session_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "msg": "Invalid credentials",
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let err = gateway
            .login(&Credentials::new("a@b.c", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(gateway.session().token().is_none());
    }

    #[tokio::test]
    async fn test_login_empty_token_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "",
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let err = gateway
            .login(&Credentials::new("a@b.c", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, CloudTaskError::InvalidResponse(_)));
        assert!(gateway.session().token().is_none());
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "msg": "User already exists",
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let err = gateway
            .register(&Credentials::new("a@b.c", "pw"))
            .await
            .unwrap_err();

        match err {
            CloudTaskError::Api { code, message } => {
                assert_eq!(code, 409);
                assert_eq!(message, "User already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);

        gateway
            .session()
            .establish("t".to_string(), "a@b.c")
            .await
            .unwrap();
        gateway.logout().await.unwrap();

        assert!(gateway.session().token().is_none());
    }
}
