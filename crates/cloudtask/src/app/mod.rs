/// **Input**: Application configuration, persisted session.
/// **Output**: Page controllers wired to one client, one session and one navigator.
/// **Position**: App layer root - builds the pages the front ends drive.
/// **Update**: Add dashboard entry redirect when no usable session exists.
pub mod dashboard;
pub mod login;
pub mod register;
pub mod route;

use std::sync::Arc;

use anyhow::{Context, Result};
use cloudtask_client::{AuthGateway, CloudTaskClient, FileTokenStore, SessionContext};

use crate::config::{AppConfig, UiConfig};

pub use dashboard::{DashboardPage, TaskRow};
pub use login::LoginPage;
pub use register::{PendingRedirect, RegisterPage};
pub use route::{Navigator, Route};

/// Shared wiring for every page
#[derive(Debug)]
pub struct App {
    gateway: AuthGateway,
    ui: UiConfig,
    navigator: Navigator,
}

impl App {
    /// Start on the dashboard when a usable session exists, else on login
    pub fn new(gateway: AuthGateway, ui: UiConfig) -> Self {
        let start = if gateway.session().is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        };
        Self {
            gateway,
            ui,
            navigator: Navigator::new(start),
        }
    }

    /// Build the client and restore the session file named by `config`
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let client =
            CloudTaskClient::with_config_and_base_url(config.client_config(), &config.api.base_url)
                .context("build HTTP client")?;

        let session_path = config.session_path()?;
        let session = SessionContext::new(Arc::new(FileTokenStore::new(&session_path)));
        let restored = session
            .restore()
            .await
            .with_context(|| format!("read session from {}", session_path.display()))?;
        tracing::debug!(path = %session_path.display(), restored, "session store opened");

        Ok(Self::new(AuthGateway::new(client, session), config.ui.clone()))
    }

    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    pub fn session(&self) -> &SessionContext {
        self.gateway.session()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.gateway.clone())
    }

    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(self.gateway.clone(), self.ui.register_redirect_delay())
    }

    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(
            self.gateway.client().clone(),
            self.gateway.session().clone(),
            self.ui.redirect_policy,
        )
    }
}
