//! Connection management for tomcat-glance.
//!
//! Owns the connection descriptors and the registry that numbers, aliases
//! and switches between them.

pub mod descriptor;
pub mod registry;

pub use descriptor::{ConnectionDescriptor, DescriptorBuilder};
pub use registry::{ConnectionRef, ConnectionRegistry};
