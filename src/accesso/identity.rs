use crate::accesso::handlers::valid_username;
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use uuid::Uuid;

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// Username to credential map seeded at startup. Password hashing and
/// durable storage belong to whatever backs this in a real deployment.
#[derive(Debug, Clone, Default)]
pub struct IdentityStore {
    users: HashMap<String, (Uuid, SecretString)>,
}

impl IdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert(&mut self, username: &str, password: SecretString) {
        self.users
            .insert(username.to_string(), (Uuid::new_v4(), password));
    }

    /// Build a store from `username:password` specs.
    /// # Errors
    /// Returns an error for a malformed spec or invalid username, naming the
    /// username but never the password.
    pub fn from_specs(specs: &[String]) -> Result<Self> {
        let mut store = Self::new();

        for spec in specs {
            let Some((username, password)) = spec.split_once(':') else {
                bail!("user spec must be username:password");
            };

            if !valid_username(username) {
                bail!("invalid username: {username}");
            }

            if password.is_empty() {
                bail!("empty password for user: {username}");
            }

            store.insert(username, SecretString::from(password.to_string()));
        }

        Ok(store)
    }

    /// Check credentials. Unknown user and wrong password are
    /// indistinguishable to the caller.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> Option<User> {
        let (id, stored) = self.users.get(username)?;

        if stored.expose_secret() == password {
            Some(User {
                id: *id,
                username: username.to_string(),
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
