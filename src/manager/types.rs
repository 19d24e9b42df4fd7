//! Types shared by the manager client, its transports and the CLI.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::connection::ConnectionDescriptor;

/// One deployed web application as reported by `GET /list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    /// Context path, e.g. `/manager` or `/`.
    pub path: String,
    /// Running status, e.g. `running` or `stopped`.
    pub status: String,
    /// Number of active sessions, as sent by the server.
    pub sessions: String,
    /// Display name (usually the docBase), e.g. `ROOT`.
    pub name: String,
}

impl Application {
    /// Returns the four raw fields in wire order.
    pub fn fields(&self) -> (&str, &str, &str, &str) {
        (&self.path, &self.status, &self.sessions, &self.name)
    }
}

/// Key/value pairs reported by `GET /serverinfo`.
pub type ServerInfo = BTreeMap<String, String>;

/// Manager text API commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerCommand {
    List,
    ServerInfo,
    Start,
    Stop,
    Reload,
}

impl ManagerCommand {
    /// Returns the command as its URL path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::ServerInfo => "serverinfo",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reload => "reload",
        }
    }

    /// Past-tense verb the server uses in its success line, for
    /// application lifecycle commands.
    pub fn success_verb(&self) -> Option<&'static str> {
        match self {
            Self::Start => Some("Started"),
            Self::Stop => Some("Stopped"),
            Self::Reload => Some("Reloaded"),
            Self::List | Self::ServerInfo => None,
        }
    }
}

impl fmt::Display for ManagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the manager text API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerRequest {
    pub command: ManagerCommand,
    /// Application context path, sent as the `path` query parameter.
    pub path: Option<String>,
}

impl ManagerRequest {
    /// Creates a request without parameters.
    pub fn new(command: ManagerCommand) -> Self {
        Self {
            command,
            path: None,
        }
    }

    /// Creates a request targeting one application.
    pub fn with_path(command: ManagerCommand, path: impl Into<String>) -> Self {
        Self {
            command,
            path: Some(path.into()),
        }
    }

    /// Full request URL for the given connection, with `path` percent-encoded.
    pub fn url(&self, descriptor: &ConnectionDescriptor) -> String {
        let base = descriptor.command_url(self.command.as_str());
        match &self.path {
            Some(path) => format!("{base}?path={}", urlencoding::encode(path)),
            None => base,
        }
    }
}

/// Status and body of a manager response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerResponse {
    pub status: u16,
    pub body: String,
}

impl ManagerResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
