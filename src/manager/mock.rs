//! Mock transport for testing.
//!
//! Replays canned responses in order and records every request it sees.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::connection::ConnectionDescriptor;
use crate::error::{ManagerError, Result};
use crate::manager::types::{ManagerRequest, ManagerResponse};
use crate::manager::ManagerTransport;

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Full URL the request would have been sent to.
    pub url: String,
    /// `host:port` of the connection used.
    pub target: String,
    pub username: String,
    pub request: ManagerRequest,
}

enum Reply {
    Response(ManagerResponse),
    TransportError(String),
}

/// A transport that never touches the network.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        lock(&self.replies).push_back(Reply::Response(ManagerResponse::new(status, body)));
    }

    /// Queues a `200 OK` response.
    pub fn push_ok(&self, body: impl Into<String>) {
        self.push_response(200, body);
    }

    /// Queues a transport failure (as if the server were unreachable).
    pub fn push_transport_error(&self, message: impl Into<String>) {
        lock(&self.replies).push_back(Reply::TransportError(message.into()));
    }

    /// Returns every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Number of queued replies not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[async_trait]
impl ManagerTransport for MockTransport {
    async fn get(
        &self,
        descriptor: &ConnectionDescriptor,
        request: &ManagerRequest,
    ) -> Result<ManagerResponse> {
        lock(&self.requests).push(RecordedRequest {
            url: request.url(descriptor),
            target: descriptor.to_string(),
            username: descriptor.username().to_string(),
            request: request.clone(),
        });

        match lock(&self.replies).pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::TransportError(message)) => Err(ManagerError::transport(message)),
            None => Err(ManagerError::transport(format!(
                "no canned response for {}",
                request.command
            ))),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
