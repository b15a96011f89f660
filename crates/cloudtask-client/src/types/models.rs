/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust model structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Deserializer, Serialize};

/// A single to-do item
///
/// `id` is only present when the backend issues one; without it a task is
/// identified by its position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "deserialize_task_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    /// Owner email, echoed back by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            user: None,
        }
    }

    /// Stable key for rendering: the server id, else the list position
    pub fn key(&self, position: usize) -> TaskKey {
        match &self.id {
            Some(id) => TaskKey::Id(id.clone()),
            None => TaskKey::Position(position),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Id(String),
    Position(usize),
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKey::Id(id) => write!(f, "{id}"),
            TaskKey::Position(position) => write!(f, "#{}", position + 1),
        }
    }
}

/// Accepts string, integer, or Mongo extended-JSON (`{"$oid": "..."}`) ids
fn deserialize_task_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(map) => map
            .get("$oid")
            .and_then(|oid| oid.as_str())
            .map(str::to_string),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_minimal_shape() {
        let task: Task = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(task, Task::new("Buy milk"));
        assert_eq!(task.key(2), TaskKey::Position(2));
        assert_eq!(task.key(2).to_string(), "#3");
    }

    #[test]
    fn test_task_with_backend_fields() {
        let task: Task =
            serde_json::from_str(r#"{"title":"Ship","user":"a@b.c","_id":{"$oid":"65f0"}}"#)
                .unwrap();
        assert_eq!(task.id.as_deref(), Some("65f0"));
        assert_eq!(task.user.as_deref(), Some("a@b.c"));
        assert_eq!(task.key(0), TaskKey::Id("65f0".to_string()));

        let task: Task = serde_json::from_str(r#"{"id":42,"title":"Numbered"}"#).unwrap();
        assert_eq!(task.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_task_serializes_without_absent_fields() {
        let value = serde_json::to_value(Task::new("Buy milk")).unwrap();
        assert_eq!(value, serde_json::json!({"title": "Buy milk"}));
    }
}
