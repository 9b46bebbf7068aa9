// Inbound request types

use serde::Deserialize;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}
