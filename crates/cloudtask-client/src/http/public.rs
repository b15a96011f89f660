/*
[INPUT]:  Nothing beyond the base URL
[OUTPUT]: Backend liveness information
[POS]:    HTTP layer - public endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{CloudTaskClient, Result};
use crate::types::HealthStatus;
use reqwest::Method;

impl CloudTaskClient {
    /// Query backend health
    ///
    /// GET /
    pub async fn health(&self) -> Result<HealthStatus> {
        let builder = self.request(Method::GET, "/")?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, CloudTaskClient, CloudTaskError, ErrorKind};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "healthy",
                "service": "CloudTaskPro Backend",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            CloudTaskClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");

        let health = client.health().await.expect("health failed");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "CloudTaskPro Backend");
        assert!(health.is_healthy());
    }

    #[tokio::test]
    async fn test_health_unexpected_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client =
            CloudTaskClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, CloudTaskError::InvalidResponse(_)));
        assert_eq!(err.kind(), ErrorKind::Server);
    }
}
