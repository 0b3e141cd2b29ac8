use crate::application_port::{CreateUser, GetUser, UserError};
use crate::domain_model::{User, UserId};
use crate::domain_port::UserPersistence;
use crate::domain_service::UserValidator;
use std::sync::Arc;
use tracing::debug;

pub struct RealUserService {
    persistence: Arc<dyn UserPersistence>,
    validator: Arc<dyn UserValidator>,
}

impl RealUserService {
    pub fn new(
        persistence: Arc<dyn UserPersistence>,
        validator: Arc<dyn UserValidator>,
    ) -> RealUserService {
        RealUserService {
            persistence,
            validator,
        }
    }
}

#[async_trait::async_trait]
impl CreateUser for RealUserService {
    async fn create_user(&self, user: User) -> Result<User, UserError> {
        if let Some(id) = user.id() {
            return Err(UserError::IdAlreadyAssigned(id));
        }
        if !self.validator.validate(&user) {
            return Err(UserError::Validation(format!(
                "user {} {} was rejected",
                user.first_name(),
                user.last_name()
            )));
        }

        let created = self.persistence.save(user).await?;
        debug!(id = ?created.id(), "user created");

        Ok(created)
    }
}

#[async_trait::async_trait]
impl GetUser for RealUserService {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let user = self.persistence.find_by_id(id).await?;
        debug!(%id, found = user.is_some(), "user lookup");

        Ok(user)
    }
}
