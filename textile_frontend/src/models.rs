use serde::{Deserialize, Serialize};

/// Body of `POST /generate`. The service accepts exactly one field.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Base64-encoded image bytes, no MIME prefix.
    pub image: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveResponse {
    #[serde(default)]
    pub results: Vec<DesignMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DesignMatch {
    pub id: String,
    #[serde(default)]
    pub craft: String,
    #[serde(default)]
    pub path: String,
}
