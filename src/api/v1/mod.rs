mod error;
mod handler;
mod router;

pub use error::{ApiError, ApiErrorCode, recover_error};
pub use handler::{ApiResponse, UserRequest, UserResponse};
pub use router::routes;

#[cfg(test)]
mod tests;
