/*
[INPUT]:  Session context (bearer token) and task titles
[OUTPUT]: The user's task collection and creation acknowledgements
[POS]:    HTTP layer - task endpoints (require bearer auth)
[UPDATE]: When adding task endpoints or changing the task schema
*/

use crate::auth::SessionContext;
use crate::http::{CloudTaskClient, Result};
use crate::types::{Acknowledgement, CreateTaskRequest, Task};
use reqwest::Method;

impl CloudTaskClient {
    /// List the session owner's tasks, in server order
    ///
    /// GET /tasks
    pub async fn list_tasks(&self, session: &SessionContext) -> Result<Vec<Task>> {
        let builder = self.authorized_request(Method::GET, "/tasks", session)?;
        self.send_json(builder).await
    }

    /// Append a task to the session owner's collection
    ///
    /// POST /tasks
    pub async fn create_task(&self, session: &SessionContext, title: &str) -> Result<Acknowledgement> {
        let body = CreateTaskRequest {
            title: title.to_string(),
        };
        let builder = self
            .authorized_request(Method::POST, "/tasks", session)?
            .json(&body);
        self.send_ack(builder).await
    }
}
