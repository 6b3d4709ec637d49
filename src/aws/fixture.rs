//! Canned-response provider API for tests.
//!
//! Responses are keyed by `"<service> <operation>"`. A missing key produces
//! an error, which is exactly how tests exercise the per-kind
//! failure-tolerance of the collectors.

use crate::aws::ProviderApi;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;

/// [`ProviderApi`] backed by an in-memory response table.
#[derive(Debug, Default)]
pub struct FixtureApi {
    responses: HashMap<String, Value>,
}

impl FixtureApi {
    pub fn new() -> Self {
        FixtureApi::default()
    }

    /// Load a response table from a JSON file mapping
    /// `"<service> <operation>"` to the canned response.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading fixture file {path}: {e}"))?;
        let responses: HashMap<String, Value> = serde_json::from_str(&json)
            .map_err(|e| format!("Error parsing fixture file {path}: {e}"))?;
        log::info!("Loaded {} fixture responses from {path}", responses.len());
        Ok(FixtureApi { responses })
    }

    /// Register or replace the response for one operation.
    pub fn insert(&mut self, key: &str, response: Value) {
        self.responses.insert(key.to_string(), response);
    }
}

impl ProviderApi for FixtureApi {
    fn call(
        &self,
        service: &str,
        operation: &str,
        _args: &[String],
    ) -> Result<Value, Box<dyn Error>> {
        let key = format!("{service} {operation}");
        match self.responses.get(&key) {
            Some(response) => Ok(response.clone()),
            None => Err(format!("no fixture response for '{key}'").into()),
        }
    }
}
