// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! plash-engine: fill, merge, validation, and publishing for dashboard runs

pub mod fill;
pub mod merge;
pub mod publish;
pub mod schema;
pub mod subprocess;

pub use fill::{
    CommandRunner, FillContext, FillError, FillResponse, FillRunner, MockRunner, OpenclawRunner,
};
pub use merge::{collect_current_values, merge, validate_field_pointers, MergeError};
pub use publish::{PublishError, Publisher, WriterSettings};
pub use schema::{validate_fill_response_value, validate_template_value};
pub use subprocess::{run_with_timeout, SubprocessError};
