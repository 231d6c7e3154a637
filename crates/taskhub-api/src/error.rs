use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// One entry in the `detail` array of a 422 response: where the problem is
/// (`["body", "title"]`, `["path", "id"]`), what it is, and an error kind
/// tag clients can branch on.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn body(field: Option<&str>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        if let Some(field) = field {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn path(segment: &str, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: vec!["path".to_string(), segment.to_string()],
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("Task with ID {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Database(#[from] taskhub_db::Error),
}

impl ApiError {
    /// Flatten `validator` output into the structured detail list.
    pub fn from_validation_errors(errors: &validator::ValidationErrors) -> Self {
        let mut detail = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors {
                let msg = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for `{}`", field));
                detail.push(FieldError::body(Some(&field), msg, error.code.to_string()));
            }
        }
        ApiError::Validation(detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": detail }))
            }
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "detail": format!("Task with ID {} not found", id) }),
            ),
            ApiError::Database(e) => {
                tracing::error!("Database error while handling request: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::TaskInput;
    use validator::Validate;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::Validation(vec![FieldError::body(Some("title"), "bad", "length")]);
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::NotFound(9999);
        assert_eq!(err.to_string(), "Task with ID 9999 not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_field_error_locations() {
        let body = FieldError::body(Some("status"), "bad", "enum");
        assert_eq!(body.loc, vec!["body", "status"]);

        let path = FieldError::path("id", "value is not a valid integer", "int_parsing");
        assert_eq!(path.loc, vec!["path", "id"]);
    }

    #[test]
    fn test_validator_errors_carry_field_and_message() {
        let input = TaskInput {
            title: String::new(),
            description: None,
            status: None,
        };
        let errors = input.validate().unwrap_err();

        let ApiError::Validation(detail) = ApiError::from_validation_errors(&errors) else {
            panic!("expected a validation error");
        };
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].loc, vec!["body", "title"]);
        assert_eq!(detail[0].msg, "title must not be empty");
    }
}
