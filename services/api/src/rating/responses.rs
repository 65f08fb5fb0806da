use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RatingFactors {
    pub base_premium: f64,
    pub multiple: f64,
}
