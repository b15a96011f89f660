/*
[INPUT]:  Session context, task input field, redirect policy
[OUTPUT]: Mirrored task collection, notices, redirects to login
[POS]:    App layer - task list controller for `/dashboard`
[UPDATE]: When task operations or failure handling change
*/

use cloudtask_client::{CloudTaskClient, CloudTaskError, ErrorKind, SessionContext, Task, TaskKey};

use crate::app::{Navigator, Route};
use crate::config::RedirectPolicy;

impl RedirectPolicy {
    /// Whether this failure should end on the login page
    pub fn should_redirect(self, err: &CloudTaskError) -> bool {
        match self {
            RedirectPolicy::UnauthorizedOnly => err.kind() == ErrorKind::Unauthorized,
            RedirectPolicy::AnyError => true,
        }
    }
}

/// One rendered line of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub key: TaskKey,
    pub title: String,
}

/// View model for `/dashboard`
#[derive(Debug)]
pub struct DashboardPage {
    client: CloudTaskClient,
    session: SessionContext,
    policy: RedirectPolicy,
    tasks: Vec<Task>,
    input: String,
    notice: Option<String>,
}

impl DashboardPage {
    pub fn new(client: CloudTaskClient, session: SessionContext, policy: RedirectPolicy) -> Self {
        Self {
            client,
            session,
            policy,
            tasks: Vec::new(),
            input: String::new(),
            notice: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(position, task)| TaskRow {
                key: task.key(position),
                title: task.title.clone(),
            })
            .collect()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Last failure that did not redirect
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Show the page: bounce to login without a usable session, else load
    pub async fn enter(&mut self, navigator: &mut Navigator) {
        if let Err(err) = self.session.bearer_token() {
            self.fail(err, "enter dashboard", navigator).await;
            return;
        }
        self.fetch_tasks(navigator).await;
    }

    /// Replace the list with the server's collection
    pub async fn fetch_tasks(&mut self, navigator: &mut Navigator) {
        match self.client.list_tasks(&self.session).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks fetched");
                self.tasks = tasks;
                self.notice = None;
            }
            Err(err) => self.fail(err, "fetch tasks", navigator).await,
        }
    }

    /// Post the current input, then re-fetch the whole list
    ///
    /// The input is cleared only after the server accepted the task.
    pub async fn create_task(&mut self, navigator: &mut Navigator) {
        match self.client.create_task(&self.session, &self.input).await {
            Ok(_) => {
                tracing::info!(title = %self.input, "task created");
                self.input.clear();
                self.notice = None;
                self.fetch_tasks(navigator).await;
            }
            Err(err) => {
                tracing::error!(title = %self.input, error = %err, "task creation failed");
                self.fail(err, "create task", navigator).await;
            }
        }
    }

    /// End the session and go back to login
    pub async fn logout(&mut self, navigator: &mut Navigator) {
        if let Err(err) = self.session.clear().await {
            tracing::warn!(error = %err, "could not remove stored session");
        }
        self.tasks.clear();
        self.input.clear();
        navigator.navigate(Route::Login);
    }

    async fn fail(&mut self, err: CloudTaskError, action: &str, navigator: &mut Navigator) {
        if !self.policy.should_redirect(&err) {
            tracing::warn!(action, error = %err, kind = ?err.kind(), "dashboard action failed");
            self.notice = Some(notice_for(&err));
            return;
        }

        tracing::info!(action, error = %err, kind = ?err.kind(), "redirecting to login");
        if err.is_auth_error() {
            if let Err(clear_err) = self.session.clear().await {
                tracing::warn!(error = %clear_err, "could not remove stored session");
            }
        }
        self.tasks.clear();
        navigator.navigate(Route::Login);
    }
}

fn notice_for(err: &CloudTaskError) -> String {
    match err.kind() {
        ErrorKind::Network => "Server unreachable, try again.".to_string(),
        ErrorKind::Server => "Server error, try again later.".to_string(),
        ErrorKind::Client | ErrorKind::Unauthorized => format!("Request failed: {err}"),
    }
}
