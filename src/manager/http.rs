//! reqwest-backed transport for the manager text API.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::connection::ConnectionDescriptor;
use crate::error::{ManagerError, Result};
use crate::manager::types::{ManagerRequest, ManagerResponse};
use crate::manager::ManagerTransport;

/// Sends manager requests over HTTP with Basic auth.
///
/// The underlying client carries no per-server settings; credentials and
/// timeout come from the descriptor on every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ManagerError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ManagerTransport for HttpTransport {
    async fn get(
        &self,
        descriptor: &ConnectionDescriptor,
        request: &ManagerRequest,
    ) -> Result<ManagerResponse> {
        let url = request.url(descriptor);
        debug!("Prepared request with method GET to {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(descriptor.username(), Some(descriptor.password()))
            .header(CONTENT_TYPE, "text/plain")
            .timeout(descriptor.timeout())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ManagerError::transport(format!(
                        "Request to {} timed out after {:?}",
                        descriptor,
                        descriptor.timeout()
                    ))
                } else if e.is_connect() {
                    ManagerError::transport(format!("Failed to connect to {}: {}", descriptor, e))
                } else {
                    ManagerError::transport(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ManagerError::transport(format!("Failed to read response: {}", e)))?;

        Ok(ManagerResponse::new(status.as_u16(), body))
    }
}
