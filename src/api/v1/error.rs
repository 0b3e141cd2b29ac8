use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use crate::domain_model::UserId;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let code = if let Some(code) = err.find::<ApiErrorCode>() {
        code.clone()
    } else if err.is_not_found() {
        ApiErrorCode::RouteNotFound
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        ApiErrorCode::InvalidArgument {
            field: None,
            detail: e.to_string(),
        }
    } else if err.find::<reject::PayloadTooLarge>().is_some() {
        ApiErrorCode::PayloadTooLarge
    } else if err.find::<reject::LengthRequired>().is_some() {
        ApiErrorCode::LengthRequired
    } else if err.find::<reject::UnsupportedMediaType>().is_some() {
        ApiErrorCode::InvalidArgument {
            field: None,
            detail: "Expected a JSON body".to_string(),
        }
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        ApiErrorCode::MethodNotAllowed
    } else {
        ApiErrorCode::internal(format!("unhandled rejection: {:?}", err))
    };

    let json = warp::reply::json(&ApiResponse::<()>::err(&code));
    Ok(warp::reply::with_status(json, code.status()))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("User with id {0} not found")]
    UserNotFound(UserId),
    #[error("{detail}")]
    InvalidArgument {
        field: Option<&'static str>,
        detail: String,
    },
    #[error("{0}")]
    ValidationFailed(String),
    #[error("Request body is too large")]
    PayloadTooLarge,
    #[error("Content-Length header is required")]
    LengthRequired,
    #[error("No route matches the request")]
    RouteNotFound,
    #[error("Method not allowed for this route")]
    MethodNotAllowed,
    #[error("Internal server error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::UserNotFound(_) => "USER_NOT_FOUND",
            ApiErrorCode::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ApiErrorCode::ValidationFailed(_) => "VALIDATION_FAILED",
            ApiErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ApiErrorCode::LengthRequired => "LENGTH_REQUIRED",
            ApiErrorCode::RouteNotFound => "NOT_FOUND",
            ApiErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiErrorCode::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::LengthRequired => StatusCode::LENGTH_REQUIRED,
            ApiErrorCode::RouteNotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short summary placed in the envelope's `message`.
    pub fn summary(&self) -> &'static str {
        match self {
            ApiErrorCode::UserNotFound(_) => "User not found",
            ApiErrorCode::InvalidArgument { .. } => "Invalid argument",
            ApiErrorCode::ValidationFailed(_) => "Validation failed",
            ApiErrorCode::PayloadTooLarge => "Payload too large",
            ApiErrorCode::LengthRequired => "Length required",
            ApiErrorCode::RouteNotFound => "Not found",
            ApiErrorCode::MethodNotAllowed => "Method not allowed",
            ApiErrorCode::InternalError => "Internal server error",
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            ApiErrorCode::InvalidArgument { field, .. } => *field,
            _ => None,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<UserError> for ApiErrorCode {
    fn from(error: UserError) -> Self {
        match error {
            UserError::IdAlreadyAssigned(id) => ApiErrorCode::InvalidArgument {
                field: Some("id"),
                detail: format!("New users cannot carry an id, got {id}"),
            },
            UserError::Validation(e) => ApiErrorCode::ValidationFailed(e),
            UserError::Persistence(e) => ApiErrorCode::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::PersistenceError;

    #[test]
    fn persistence_failures_hide_their_cause() {
        let code = ApiErrorCode::from(UserError::Persistence(PersistenceError::Store(
            "password=hunter2".to_string(),
        )));

        assert_eq!(code.code(), "INTERNAL_ERROR");
        assert_eq!(code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code.to_string(), "Internal server error");
    }

    #[test]
    fn validation_rejection_is_unprocessable() {
        let code = ApiErrorCode::from(UserError::Validation("blocked".to_string()));

        assert_eq!(code.code(), "VALIDATION_FAILED");
        assert_eq!(code.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_names_the_id() {
        let code = ApiErrorCode::UserNotFound(UserId(12));

        assert_eq!(code.to_string(), "User with id 12 not found");
        assert_eq!(code.field(), None);
    }
}
