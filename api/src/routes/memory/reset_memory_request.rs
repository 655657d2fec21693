use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ResetMemoryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetMemoryResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// Echoed back as sent; `null` when the caller gave none.
    pub user_id: Option<String>,
}
