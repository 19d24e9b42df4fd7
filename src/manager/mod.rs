//! Tomcat Manager text API client.
//!
//! [`TomcatManager`] is the caller-facing surface: it owns a
//! [`ConnectionRegistry`] of descriptors and runs every command against the
//! registry's current connection through a [`ManagerTransport`].

mod client;
mod http;
mod mock;
pub mod parser;
mod types;

pub use client::ManagerClient;
pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedRequest};
pub use types::{Application, ManagerCommand, ManagerRequest, ManagerResponse, ServerInfo};

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::connection::{ConnectionDescriptor, ConnectionRef, ConnectionRegistry};
use crate::error::Result;

/// Trait for sending a single manager request.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait ManagerTransport: Send + Sync {
    /// Sends `request` to the server described by `descriptor` and returns
    /// the raw status and body. Only transport failures are errors here;
    /// status codes are interpreted by the caller.
    async fn get(
        &self,
        descriptor: &ConnectionDescriptor,
        request: &ManagerRequest,
    ) -> Result<ManagerResponse>;
}

/// Manages several Tomcat connections and runs commands on the current one.
pub struct TomcatManager<T = HttpTransport> {
    registry: ConnectionRegistry<ConnectionDescriptor>,
    client: ManagerClient<T>,
}

impl TomcatManager<HttpTransport> {
    /// Creates a manager that talks HTTP.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: ManagerTransport> TomcatManager<T> {
    /// Creates a manager over the given transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            client: ManagerClient::new(transport),
        }
    }

    /// Opens a connection and makes it current.
    ///
    /// Returns the connection index.
    pub fn connect(
        &mut self,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        timeout: Duration,
        alias: Option<&str>,
    ) -> Result<usize> {
        let descriptor = ConnectionDescriptor::new(host, port, username, password, timeout);
        self.connect_with(descriptor, alias)
    }

    /// Registers a prepared descriptor and makes it current.
    pub fn connect_with(
        &mut self,
        descriptor: ConnectionDescriptor,
        alias: Option<&str>,
    ) -> Result<usize> {
        info!(
            host = descriptor.host(),
            port = descriptor.port(),
            username = descriptor.username(),
            timeout_secs = descriptor.timeout().as_secs(),
            alias,
            "Connecting to Tomcat"
        );
        self.registry.register(descriptor, alias)
    }

    /// Switches to another connection by index or alias.
    ///
    /// Returns the index of the previously current connection.
    pub fn switch(&mut self, id: impl Into<ConnectionRef>) -> Result<usize> {
        self.registry.switch(id)
    }

    /// Closes the current connection, if any.
    pub fn disconnect(&mut self) -> Option<ConnectionDescriptor> {
        let closed = self.registry.close_current();
        if let Some(descriptor) = &closed {
            info!(
                host = descriptor.host(),
                port = descriptor.port(),
                "Closed connection"
            );
        }
        closed
    }

    /// Closes every connection. The next connect returns index 1.
    ///
    /// Returns the number of connections closed; the current index is 0
    /// afterwards.
    pub fn close_all(&mut self) -> usize {
        let closed = self.registry.close_all();
        info!(closed, "Closed all Tomcat connections");
        closed
    }

    /// Read access to the connection registry.
    pub fn registry(&self) -> &ConnectionRegistry<ConnectionDescriptor> {
        &self.registry
    }

    /// Descriptor of the current connection.
    pub fn current(&self) -> Result<&ConnectionDescriptor> {
        self.registry.current()
    }

    /// Underlying command client.
    pub fn client(&self) -> &ManagerClient<T> {
        &self.client
    }

    /// Lists applications deployed on the current server.
    pub async fn list(&self) -> Result<Vec<Application>> {
        self.client.list_applications(self.current()?).await
    }

    /// Running status of the application at `path` on the current server.
    pub async fn application_status(&self, path: &str) -> Result<String> {
        self.client.application_status(self.current()?, path).await
    }

    /// Server and JVM information of the current server.
    pub async fn server_info(&self) -> Result<ServerInfo> {
        self.client.server_info(self.current()?).await
    }

    pub async fn start(&self, path: &str) -> Result<()> {
        self.client.start(self.current()?, path).await
    }

    pub async fn stop(&self, path: &str) -> Result<()> {
        self.client.stop(self.current()?, path).await
    }

    pub async fn reload(&self, path: &str) -> Result<()> {
        self.client.reload(self.current()?, path).await
    }
}
