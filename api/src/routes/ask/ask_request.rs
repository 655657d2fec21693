use serde::{Deserialize, Serialize};

/// Request payload for /api/ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Caller id, only used for logging.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Natural language question. Missing is treated as empty.
    #[serde(default)]
    pub question: String,
    /// Client-side transcript of the conversation so far.
    #[serde(default)]
    pub chat_text: Option<String>,
    /// Structured history some clients send; accepted and ignored.
    #[serde(default)]
    pub conversation_history: Option<serde_json::Value>,
    #[serde(default)]
    pub remember: Option<bool>,
}

/// Response payload for /api/ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
