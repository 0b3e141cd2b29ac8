use super::error::*;
use crate::application_port::{CreateUser, GetUser};
use crate::domain_model::{User, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, info_span};
use warp::reject;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn err(code: &ApiErrorCode) -> Self {
        ApiResponse {
            success: false,
            message: Some(code.summary().to_string()),
            data: None,
            error: Some(ApiError {
                code: code.code(),
                detail: code.to_string(),
                field: code.field(),
            }),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
}

impl UserRequest {
    fn check(&self) -> Result<(), ApiErrorCode> {
        check_name("firstName", &self.first_name)?;
        check_name("lastName", &self.last_name)?;
        Ok(())
    }

    fn into_domain(self) -> User {
        User::new(self.first_name, self.last_name)
    }
}

fn check_name(field: &'static str, value: &str) -> Result<(), ApiErrorCode> {
    if value.trim().is_empty() {
        return Err(ApiErrorCode::InvalidArgument {
            field: Some(field),
            detail: format!("{field} must not be blank"),
        });
    }

    let len = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ApiErrorCode::InvalidArgument {
            field: Some(field),
            detail: format!(
                "{field} must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            ),
        });
    }

    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
        }
    }
}

fn request_id() -> String {
    nanoid::nanoid!(12)
}

pub async fn create_user(
    body: UserRequest,
    create_user: Arc<dyn CreateUser>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let span = info_span!("create_user", request_id = %request_id());

    async move {
        body.check().map_err(reject::custom)?;

        let created = create_user
            .create_user(body.into_domain())
            .await
            .map_err(ApiErrorCode::from)
            .map_err(reject::custom)?;

        let response = ApiResponse::ok(UserResponse::from(created), "User created");
        Ok::<_, warp::Rejection>(warp::reply::json(&response))
    }
    .instrument(span)
    .await
}

pub async fn get_user(
    id: UserId,
    get_user: Arc<dyn GetUser>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let span = info_span!("get_user", request_id = %request_id(), %id);

    async move {
        let user = get_user
            .find_by_id(id)
            .await
            .map_err(ApiErrorCode::from)
            .map_err(reject::custom)?
            .ok_or_else(|| reject::custom(ApiErrorCode::UserNotFound(id)))?;

        let response = ApiResponse::ok(UserResponse::from(user), "User found");
        Ok::<_, warp::Rejection>(warp::reply::json(&response))
    }
    .instrument(span)
    .await
}
