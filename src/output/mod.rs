//! Rendering of the fetched data.
//!
//! Three independent, stateless render passes over the same inventory:
//! - [`mermaid`] - Topology and NACL diagrams, and the point-to-point flow
//! - [`report`] - The full Markdown report
//! - [`format`] - Shared label formatting helpers

pub mod format;
pub mod mermaid;
pub mod report;

pub use mermaid::{flow_diagram, nacl_overview_diagram, security_groups_diagram, FlowOutcome};
pub use report::full_report;
