use chrono::{DateTime, Utc};
use sqlx::FromRow;

use taskhub_core::{Task, DEFAULT_DESCRIPTION};

use crate::{Error, Result};

/// Raw `task` row as it comes out of PostgreSQL. The `status` column is
/// free text at the database level and only becomes a `TaskStatus` during
/// `into_task`.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Map a stored row to the response model. Status text outside the
    /// three known values is an error.
    pub fn into_task(self) -> Result<Task> {
        let status = self
            .status
            .parse()
            .map_err(|_| Error::InvalidStatus(self.status.clone()))?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::TaskStatus;

    fn row(status: &str, description: Option<&str>) -> TaskRow {
        let now = Utc::now();
        TaskRow {
            id: 1,
            title: "Sample Task".to_string(),
            description: description.map(String::from),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_maps_to_task() {
        let task = row("In Progress", Some("details")).into_task().unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.description, "details");
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_null_description_gets_placeholder() {
        let task = row("Open", None).into_task().unwrap();
        assert_eq!(task.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let err = row("Archived", None).into_task().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(ref s) if s == "Archived"));
    }
}
