//! In-memory user store with a monotonic id counter.
//!
//! # Design
//! Records live in a `Vec` so iteration order is creation order. Lookups are
//! linear scans, which is plenty for a demo-sized list. `next_id` only ever
//! grows: deleting the newest record does not hand its id out again.

use crate::error::{ConfigError, NotFoundError, ValidationError};
use crate::types::{NewUser, UserRecord};
use crate::validation;

#[derive(Debug, Clone)]
pub struct UserStore {
    records: Vec<UserRecord>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed records, keeping their order.
    ///
    /// Seeds must carry distinct positive ids and pass the same checks as a
    /// created user. `next_id` starts one past the largest seed id.
    pub fn seeded(seed: Vec<UserRecord>) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        for user in seed {
            if user.id == 0 {
                return Err(ConfigError::invalid("seed user ids must be positive"));
            }
            if store.get(user.id).is_some() {
                return Err(ConfigError::invalid(format!("duplicate seed user id {}", user.id)));
            }
            validation::validate_new_user(&user.name, &user.email).map_err(|e| {
                ConfigError::invalid(format!("seed user {}: {e}", user.id))
            })?;
            let following = user
                .id
                .checked_add(1)
                .ok_or_else(|| ConfigError::invalid(format!("seed user id {} is too large", user.id)))?;
            store.next_id = store.next_id.max(following);
            store.records.push(user);
        }
        Ok(store)
    }

    /// The id the next created record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a record built from already-validated input. Fails once the
    /// counter cannot advance, so no id is ever handed out twice.
    pub fn insert(&mut self, user: NewUser) -> Result<UserRecord, ValidationError> {
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(ValidationError::IdsExhausted)?;
        let record = UserRecord {
            id: self.next_id,
            name: user.name,
            email: user.email,
        };
        self.next_id = following;
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn rename(&mut self, id: u64, name: String) -> Result<&UserRecord, NotFoundError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(NotFoundError { id })?;
        record.name = name;
        Ok(record)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }
}
