// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::convert::Infallible;

/// Key under which the full snapshot is stored.
pub const DATA_KEY: &str = "CMX_DATA";

/// Key under which the signed-in user's id is stored.
pub const SESSION_KEY: &str = "CMX_SESSION";

/// A string key-value backend.
///
/// The store writes whole values; backends do not need to support partial
/// updates or transactions across keys.
pub trait KeyValueStore {
    /// The backend's error type.
    type Error: std::fmt::Display;

    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&mut self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Removes a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// A process-local backend. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: HashMap<String, usize>,
}

impl MemoryStore {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value without going through the trait.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns how many times `key` has been set or removed.
    #[cfg(test)]
    #[must_use]
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.get(key).copied().unwrap_or(0)
    }

    fn record_write(&mut self, key: &str) {
        *self.writes.entry(key.to_string()).or_insert(0) += 1;
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        self.record_write(key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.values.remove(key);
        self.record_write(key);
        Ok(())
    }
}
