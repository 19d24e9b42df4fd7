//! Immutable description of one Tomcat Manager endpoint.

use std::fmt;
use std::time::Duration;

/// Default manager port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default manager user, matching the stock `tomcat-users.xml` examples.
pub const DEFAULT_USERNAME: &str = "tomcat";

/// Default manager password.
pub const DEFAULT_PASSWORD: &str = "tomcat";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Endpoint, credentials and timeout for one logical connection.
///
/// Descriptors hold no live resources. Closing a connection simply drops
/// its descriptor.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
    url: String,
}

impl ConnectionDescriptor {
    /// Creates a descriptor and derives the manager base URL.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let host: String = host.into();
        let url = format!("http://{host}:{port}/manager/text");
        Self {
            host,
            port,
            username: username.into(),
            password: password.into(),
            timeout,
            url,
        }
    }

    /// Starts a builder with the default port, credentials and timeout.
    pub fn builder(host: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            host: host.into(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Base URL of the manager text interface, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the URL for a manager command, e.g. `.../manager/text/list`.
    pub fn command_url(&self, command: &str) -> String {
        format!("{}/{}", self.url, command)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"******")
            .field("timeout", &self.timeout)
            .field("url", &self.url)
            .finish()
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Builder for [`ConnectionDescriptor`] with the library defaults pre-filled.
#[derive(Clone)]
pub struct DescriptorBuilder {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl DescriptorBuilder {
    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the Basic auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> ConnectionDescriptor {
        ConnectionDescriptor::new(
            self.host,
            self.port,
            self.username,
            self.password,
            self.timeout,
        )
    }
}
