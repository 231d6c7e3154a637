use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Stored in place of a description when the client omits one.
pub const DEFAULT_DESCRIPTION: &str = "No Description provided";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
pub enum TaskStatus {
    Open,
    #[default]
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Closed,
}

/// A stored task as returned to clients. Every field is present;
/// `id` and the timestamps are assigned by storage, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted by the create and update endpoints.
///
/// The schema is strict: any field outside `title`, `description` and
/// `status` fails deserialization, so clients cannot smuggle in `id` or
/// timestamp values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TaskInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskInput {
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn status_or_default(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            json!("In Progress")
        );
        assert_eq!(serde_json::to_value(TaskStatus::Open).unwrap(), json!("Open"));
        assert_eq!(
            serde_json::to_value(TaskStatus::Closed).unwrap(),
            json!("Closed")
        );
    }

    #[test]
    fn test_status_display_matches_wire_form() {
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
        assert_eq!("In Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("Open".parse::<TaskStatus>().unwrap(), TaskStatus::Open);
        assert!("Done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_input_defaults() {
        let input: TaskInput = serde_json::from_value(json!({"title": "My Task"})).unwrap();
        assert_eq!(input.title, "My Task");
        assert_eq!(input.description_or_default(), DEFAULT_DESCRIPTION);
        assert_eq!(input.status_or_default(), TaskStatus::InProgress);
    }

    #[test]
    fn test_input_missing_title_is_rejected() {
        let result = serde_json::from_value::<TaskInput>(json!({}));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("title"));
    }

    #[test]
    fn test_input_rejects_unknown_fields() {
        let result =
            serde_json::from_value::<TaskInput>(json!({"title": "t", "priority": "high"}));
        assert!(result.unwrap_err().to_string().contains("unknown field"));

        // Server-assigned fields count as unknown too
        let result = serde_json::from_value::<TaskInput>(json!({"title": "t", "id": 7}));
        assert!(result.is_err());
    }

    #[test]
    fn test_input_rejects_invalid_status() {
        let result =
            serde_json::from_value::<TaskInput>(json!({"title": "t", "status": "Paused"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let input = TaskInput {
            title: String::new(),
            description: None,
            status: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_task_serializes_all_fields() {
        let task = Task {
            id: 1,
            title: "My Task".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            status: TaskStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["status"], "Open");
        assert!(value["created_at"].is_string());
        assert!(value["updated_at"].is_string());
    }
}
