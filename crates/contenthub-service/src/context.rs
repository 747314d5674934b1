//! Request context carrying the acting admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is performing a mutation.
///
/// Built at the API edge from the identity the admin gateway forwards and
/// passed into every mutating service call, so ownership and audit logging
/// never have to guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub actor_id: Uuid,
    /// IP address of the request origin.
    pub ip_address: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor_id: Uuid, ip_address: impl Into<String>) -> Self {
        Self {
            actor_id,
            ip_address: ip_address.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for local tooling (CLI, tests) with a fixed actor.
    pub fn system(actor_id: Uuid) -> Self {
        Self::new(actor_id, "127.0.0.1")
    }
}
