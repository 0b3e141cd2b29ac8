use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(UserId)
    }
}

/// A person known to the system.
///
/// `id` is `None` until the user has been stored; the store assigns it once
/// and it never changes afterwards. Values are never edited in place, use
/// [`User::with_id`] to derive the stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<UserId>,
    first_name: String,
    last_name: String,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        User {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Rebuilds a stored user, e.g. from a database row.
    pub fn stored(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        User::new(first_name, last_name).with_id(id)
    }

    pub fn with_id(self, id: UserId) -> Self {
        User {
            id: Some(id),
            ..self
        }
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}
