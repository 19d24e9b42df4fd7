//! Command client: one request per manager command.

use tracing::{debug, warn};

use crate::connection::ConnectionDescriptor;
use crate::error::{ManagerError, Result};
use crate::manager::parser;
use crate::manager::types::{Application, ManagerCommand, ManagerRequest, ServerInfo};
use crate::manager::ManagerTransport;

/// Issues manager commands against a given connection and interprets the
/// plaintext answers. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ManagerClient<T> {
    transport: T,
}

impl<T: ManagerTransport> ManagerClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists deployed applications.
    pub async fn list_applications(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Vec<Application>> {
        let body = self.fetch(descriptor, ManagerCommand::List).await?;
        parser::parse_list(&body)
    }

    /// Returns the running status of the application at `path`.
    pub async fn application_status(
        &self,
        descriptor: &ConnectionDescriptor,
        path: &str,
    ) -> Result<String> {
        self.list_applications(descriptor)
            .await?
            .into_iter()
            .find(|app| app.path == path)
            .map(|app| app.status)
            .ok_or_else(|| ManagerError::ApplicationNotFound(path.to_string()))
    }

    /// Fetches server and JVM information.
    pub async fn server_info(&self, descriptor: &ConnectionDescriptor) -> Result<ServerInfo> {
        let body = self.fetch(descriptor, ManagerCommand::ServerInfo).await?;
        parser::parse_server_info(&body)
    }

    pub async fn start(&self, descriptor: &ConnectionDescriptor, path: &str) -> Result<()> {
        self.lifecycle(descriptor, ManagerCommand::Start, path).await
    }

    pub async fn stop(&self, descriptor: &ConnectionDescriptor, path: &str) -> Result<()> {
        self.lifecycle(descriptor, ManagerCommand::Stop, path).await
    }

    pub async fn reload(&self, descriptor: &ConnectionDescriptor, path: &str) -> Result<()> {
        self.lifecycle(descriptor, ManagerCommand::Reload, path).await
    }

    /// Sends a parameterless command and returns the body of a 2xx answer.
    async fn fetch(
        &self,
        descriptor: &ConnectionDescriptor,
        command: ManagerCommand,
    ) -> Result<String> {
        let response = self
            .transport
            .get(descriptor, &ManagerRequest::new(command))
            .await?;

        if !response.is_success() {
            return Err(ManagerError::status(response.status, response.body));
        }
        Ok(response.body)
    }

    /// Runs start/stop/reload. The status code is not consulted: only the
    /// exact success line counts.
    async fn lifecycle(
        &self,
        descriptor: &ConnectionDescriptor,
        command: ManagerCommand,
        path: &str,
    ) -> Result<()> {
        let response = self
            .transport
            .get(descriptor, &ManagerRequest::with_path(command, path))
            .await?;
        debug!("Response: {}", response.body);

        if parser::is_command_success(command, path, &response.body) {
            return Ok(());
        }

        warn!(
            command = command.as_str(),
            path,
            status = response.status,
            "manager command was not acknowledged"
        );
        Err(ManagerError::command_failed(command.as_str(), response.body))
    }
}
