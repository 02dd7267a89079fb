//! Transport from the form to the intake endpoint.

use std::future::Future;

use enroll_core::registration::RegistrationDraft;
use enroll_core::types::DbId;
use serde::Deserialize;

/// Path of the intake endpoint, relative to the server base URL.
pub const REGISTER_PATH: &str = "/api/register";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the form learns from an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Generated identifier of the stored record, when the server returned it.
    pub registration_id: Option<DbId>,
    pub message: String,
}

/// Error type for submission failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request never completed (offline, DNS, connection refused, ...).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Registration rejected with HTTP {status}")]
    Rejected {
        status: u16,
        /// The server's `error` message, if the body carried one.
        message: Option<String>,
    },

    /// The server answered 2xx, but not with a success envelope.
    #[error("Unexpected response body with HTTP {status}")]
    UnexpectedBody { status: u16 },
}

impl SubmitError {
    /// The server-provided explanation, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmitError::Rejected { message, .. } => message.as_deref(),
            SubmitError::Transport(_) | SubmitError::UnexpectedBody { .. } => None,
        }
    }
}

/// Sends a serialized draft to the intake handler.
///
/// Implementations make exactly one request per call and never retry.
pub trait RegistrationApi: Send + Sync {
    fn submit(
        &self,
        draft: &RegistrationDraft,
    ) -> impl Future<Output = Result<SubmitReceipt, SubmitError>> + Send;
}

// ---------------------------------------------------------------------------
// HttpRegistrationApi
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    success: bool,
    #[serde(default)]
    message: String,
    data: Option<AcceptedRecord>,
}

#[derive(Debug, Deserialize)]
struct AcceptedRecord {
    id: DbId,
}

#[derive(Debug, Deserialize)]
struct RejectedBody {
    error: Option<String>,
}

/// [`RegistrationApi`] over HTTP using `reqwest`.
///
/// No timeout is configured; the client default applies.
#[derive(Debug, Clone)]
pub struct HttpRegistrationApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRegistrationApi {
    /// Target the intake endpoint under `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{REGISTER_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RegistrationApi for HttpRegistrationApi {
    async fn submit(&self, draft: &RegistrationDraft) -> Result<SubmitReceipt, SubmitError> {
        let response = self.client.post(&self.endpoint).json(draft).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return match serde_json::from_slice::<AcceptedBody>(&bytes) {
                Ok(body) if body.success => Ok(SubmitReceipt {
                    registration_id: body.data.map(|d| d.id),
                    message: body.message,
                }),
                _ => {
                    tracing::warn!(status = status.as_u16(), "Unreadable success response");
                    Err(SubmitError::UnexpectedBody {
                        status: status.as_u16(),
                    })
                }
            };
        }

        let message = serde_json::from_slice::<RejectedBody>(&bytes)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());

        tracing::debug!(status = status.as_u16(), ?message, "Registration rejected");

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
