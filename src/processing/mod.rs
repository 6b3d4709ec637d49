//! Derived views over the fetched inventory.
//!
//! This module contains the business logic between collection and
//! rendering:
//! - [`attachments`] - Mapping security groups to their attached components
//! - [`topology`] - The directed reachability edge list

mod attachments;
mod topology;

// Re-export public types and functions
pub use attachments::AttachmentIndex;
pub use topology::{build_edges, is_public_cidr, Edge, Node};
