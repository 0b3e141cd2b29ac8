use crate::domain_model::User;

/// Business rules a user must satisfy before it is created.
pub trait UserValidator: Send + Sync {
    fn validate(&self, user: &User) -> bool;
}

/// Accepts every user. No business rules exist yet.
#[derive(Debug, Default)]
pub struct PermissiveUserValidator;

impl PermissiveUserValidator {
    pub fn new() -> Self {
        Self
    }
}

impl UserValidator for PermissiveUserValidator {
    fn validate(&self, _user: &User) -> bool {
        true
    }
}
