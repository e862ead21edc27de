// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fill runner: pluggable source of field values for a template run.
//!
//! A provider receives a [`FillContext`] and yields the raw JSON payload
//! it extracted from its source. Shape validation into a typed
//! [`FillResponse`] is the executor's next gate, so repair hints can
//! carry the validation message back into the next provider call.

mod agent;
mod command;
mod mock;
pub mod parse;
pub mod prompt;

pub use agent::OpenclawRunner;
pub use command::CommandRunner;
pub use mock::MockRunner;

use async_trait::async_trait;
use plash_core::DashboardTemplate;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from fill providers and response shaping
#[derive(Debug, Error)]
pub enum FillError {
    #[error("fill provider {provider} failed: {message}")]
    Provider { provider: &'static str, message: String },
    #[error("fill provider {provider} produced no extractable JSON")]
    Parse { provider: &'static str },
    #[error("fill response shape invalid: {}", .errors.join("; "))]
    ShapeInvalid { errors: Vec<String> },
    #[error("fill command provider is disabled (enable allow_fill_command)")]
    Disabled,
}

/// Everything a provider needs for one fill invocation.
pub struct FillContext<'a> {
    pub template: &'a DashboardTemplate,
    /// Current value at each field pointer, keyed by field id.
    pub current_values: &'a Map<String, Value>,
    /// Retry attempt number, starting at 0.
    pub attempt: u32,
    /// Failure message from the previous repair iteration, when any.
    pub error_hint: Option<String>,
}

/// Typed fill response after shape validation.
#[derive(Debug, Clone)]
pub struct FillResponse {
    pub values: Map<String, Value>,
}

impl FillResponse {
    /// Shape-validate a raw provider payload into a typed response.
    pub fn from_value(value: &Value) -> Result<Self, FillError> {
        let errors = crate::schema::validate_fill_response_value(value);
        if !errors.is_empty() {
            return Err(FillError::ShapeInvalid { errors });
        }
        // Shape validation guarantees the values object exists.
        let values = value
            .get("values")
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| FillError::ShapeInvalid {
                errors: vec!["values must be an object".to_string()],
            })?;
        Ok(Self { values })
    }
}

/// A pluggable source of field values.
#[async_trait]
pub trait FillRunner: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Produce the raw fill payload for one invocation.
    async fn run(&self, ctx: &FillContext<'_>) -> Result<Value, FillError>;
}
