//! Shared test utilities for unit tests
//!
//! Integration tests in the root package keep their own helpers in
//! tests/common/mod.rs, since `#[cfg(test)]` items are not visible there.

use crate::types::{ISOTimestamp, RunId, RunRecord, ShoeId};
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Serializes environment variable modifications across tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Run at noon UTC on the given date
pub fn run_on(id: &str, year: i32, month: u32, day: u32, distance: f64) -> RunRecord {
    RunRecord::new(
        RunId::new(id),
        ShoeId::new("test-shoe"),
        ISOTimestamp::new(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()),
        distance,
    )
}

/// RAII guard for environment variable manipulation in tests
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    /// Create a new environment variable guard
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an environment variable and remember its original value
    pub fn set(&mut self, key: &str, value: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        // env::set_var is unsafe since the 2024 edition
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}
