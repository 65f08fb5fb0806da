use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(rename = "bodyType")]
    pub body_type: String,
    pub make: String,
}
