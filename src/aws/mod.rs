//! AWS API interaction.
//!
//! This module handles all provider-boundary operations:
//! - [`api`] - The read-only list/describe call surface and pagination
//! - [`cli`] - Command execution for the AWS CLI
//! - [`fixture`] - Canned-response API used by tests

mod api;
mod cli;
mod fixture;

// Re-export public types and functions
pub use api::{decode, paginate, ProviderApi};
pub use cli::{run, CliApi};
pub use fixture::FixtureApi;
