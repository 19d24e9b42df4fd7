//! tomcat-glance - manage several Apache Tomcat Manager connections.
//!
//! [`connection::ConnectionRegistry`] numbers and aliases connections and
//! tracks the current one. [`manager::TomcatManager`] runs the manager text
//! API (`list`, `serverinfo`, `start`, `stop`, `reload`) against it.

pub mod config;
pub mod connection;
pub mod error;
pub mod logging;
pub mod manager;

pub use connection::{ConnectionDescriptor, ConnectionRef, ConnectionRegistry};
pub use error::{ManagerError, Result};
pub use manager::{Application, HttpTransport, ManagerTransport, MockTransport, ServerInfo, TomcatManager};
