use async_trait::async_trait;

use premia_common::error::PremiaResult;

/// Point lookups against the rating-factor tables.
///
/// Both lookups are independent read-only queries; `None` means the key has
/// no row, which callers surface as a not-found outcome rather than an error.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn multiple_for_make(&self, make: &str) -> PremiaResult<Option<f64>>;
    async fn premium_for_body_type(&self, body_type: &str) -> PremiaResult<Option<f64>>;
}
