use crate::domain_model::*;
use crate::domain_port::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user already has id {0}")]
    IdAlreadyAssigned(UserId),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[async_trait::async_trait]
pub trait CreateUser: Send + Sync {
    /// Stores a new user. `user.id()` must be `None`.
    async fn create_user(&self, user: User) -> Result<User, UserError>;
}

#[async_trait::async_trait]
pub trait GetUser: Send + Sync {
    /// `Ok(None)` when no user has this id; turning that into "not found" is
    /// up to the caller.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
}
