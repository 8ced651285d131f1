//! Webhook acknowledgement.

use serde::Serialize;

/// Body returned once an update has been processed.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
