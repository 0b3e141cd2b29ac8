use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local store. Ids start at 1 and are never reused.
pub struct InMemoryUserPersistence {
    users: DashMap<UserId, User>,
    next_id: AtomicU64,
}

impl InMemoryUserPersistence {
    pub fn new() -> Self {
        InMemoryUserPersistence {
            users: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for InMemoryUserPersistence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserPersistence for InMemoryUserPersistence {
    async fn save(&self, user: User) -> Result<User, PersistenceError> {
        let (id, stored) = match user.id() {
            Some(id) => {
                let after = id.0.checked_add(1).ok_or_else(id_space_exhausted)?;
                // keep the sequence ahead of explicitly placed ids
                self.next_id.fetch_max(after, Ordering::SeqCst);
                (id, user)
            }
            None => {
                let next = self
                    .next_id
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                    .map_err(|_| id_space_exhausted())?;
                let id = UserId(next);
                (id, user.with_id(id))
            }
        };
        self.users.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }
}

fn id_space_exhausted() -> PersistenceError {
    PersistenceError::Store("user id space exhausted".to_string())
}
