use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, FieldError};

/// JSON extractor that reports failures as a structured 422 instead of
/// axum's plain-text rejections. Deserialization problems (malformed JSON,
/// unknown or missing fields, invalid enum values) and `validator` rule
/// failures end up in the same `detail` format.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|e| ApiError::from_validation_errors(&e))?;

        Ok(AppJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "value_error",
        JsonRejection::JsonSyntaxError(_) => "syntax_error",
        JsonRejection::MissingJsonContentType(_) => "missing_content_type",
        _ => "invalid_body",
    };

    ApiError::Validation(vec![FieldError::body(None, rejection.body_text(), kind)])
}
