use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("store error: {0}")]
    Store(String),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Storage seen from the application layer.
///
/// Absence of a record is `Ok(None)`, never an error. Adapters own every
/// schema, connection and transaction detail.
#[async_trait::async_trait]
pub trait UserPersistence: Send + Sync {
    /// Inserts `user` when its id is unset and returns it with the assigned id.
    async fn save(&self, user: User) -> Result<User, PersistenceError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError>;
}
