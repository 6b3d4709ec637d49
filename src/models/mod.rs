//! Domain models for the AWS security summary.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Vpc`] - Virtual network container
//! - [`SecurityGroupRecord`] and [`Rule`] - Stateful firewall policies
//! - [`NaclRecord`] and [`NaclEntry`] - Stateless subnet-level filters
//! - [`Component`] and [`ComponentKind`] - Resources bindable to security groups

mod component;
mod nacl;
mod security_group;
mod vpc;

// Re-export public types
pub use component::{Component, ComponentKind};
pub use nacl::{NaclEntry, NaclPortRange, NaclRecord};
pub use security_group::{GroupPair, IpRange, Rule, SecurityGroupRecord};
pub use vpc::{Tag, Vpc};
