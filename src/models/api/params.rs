use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ParamsRunLighthouse {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub progress: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
}
