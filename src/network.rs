use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Who owns which assistants. Serialized as `{ "user": ["assistant", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkDirectory {
    users: BTreeMap<String, Vec<String>>,
}

impl NetworkDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user: &str, assistant: &str) -> bool {
        self.users
            .get(user)
            .map_or(false, |assistants| assistants.iter().any(|a| a == assistant))
    }

    /// Returns false if the pair was already registered.
    pub fn register(&mut self, user: &str, assistant: &str) -> bool {
        if self.contains(user, assistant) {
            return false;
        }
        self.users
            .entry(user.to_string())
            .or_default()
            .push(assistant.to_string());
        true
    }

    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn assistants_of(&self, user: &str) -> &[String] {
        self.users.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
