use async_trait::async_trait;
use sqlx::PgPool;

use crate::rating::repositories::RatingRepository;
use premia_common::error::{PremiaError, PremiaResult};

#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn multiple_for_make(&self, make: &str) -> PremiaResult<Option<f64>> {
        sqlx::query_scalar::<_, f64>(
            "select multiple::float8 from make where make = $1 limit 1",
        )
        .bind(make)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PremiaError::Database(e.to_string()))
    }

    async fn premium_for_body_type(&self, body_type: &str) -> PremiaResult<Option<f64>> {
        sqlx::query_scalar::<_, f64>(
            "select premium::float8 from body_type where body_type = $1 limit 1",
        )
        .bind(body_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PremiaError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_pool;
    use uuid::Uuid;

    async fn test_repo() -> Option<(PgRatingRepository, PgPool)> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = create_pool(&url).await.expect("db should connect");

        // Ensure tables exist (mirrors migration 0001)
        sqlx::query(
            "create table if not exists make (
              make text primary key,
              multiple numeric(6,2) not null
            )",
        )
        .execute(&pool)
        .await
        .expect("create make");

        sqlx::query(
            "create table if not exists body_type (
              body_type text primary key,
              premium numeric(10,2) not null
            )",
        )
        .execute(&pool)
        .await
        .expect("create body_type");

        Some((PgRatingRepository::new(pool.clone()), pool))
    }

    async fn insert_make(pool: &PgPool, multiple: f64) -> String {
        let make = format!("make-{}", Uuid::new_v4());
        sqlx::query("insert into make (make, multiple) values ($1, $2)")
            .bind(&make)
            .bind(multiple)
            .execute(pool)
            .await
            .expect("insert make");
        make
    }

    async fn insert_body_type(pool: &PgPool, premium: f64) -> String {
        let body_type = format!("body-{}", Uuid::new_v4());
        sqlx::query("insert into body_type (body_type, premium) values ($1, $2)")
            .bind(&body_type)
            .bind(premium)
            .execute(pool)
            .await
            .expect("insert body_type");
        body_type
    }

    #[tokio::test]
    async fn multiple_for_make_returns_stored_value() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let make = insert_make(&pool, 1.25).await;

        let result = repo.multiple_for_make(&make).await.expect("lookup");
        assert_eq!(result, Some(1.25));
    }

    #[tokio::test]
    async fn multiple_for_make_returns_none_for_unknown_key() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };

        let result = repo
            .multiple_for_make("no-such-make")
            .await
            .expect("lookup");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn premium_for_body_type_returns_stored_value() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let body_type = insert_body_type(&pool, 500.00).await;

        let result = repo
            .premium_for_body_type(&body_type)
            .await
            .expect("lookup");
        assert_eq!(result, Some(500.0));
    }

    #[tokio::test]
    async fn premium_for_body_type_returns_none_for_unknown_key() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };

        let result = repo
            .premium_for_body_type("no-such-body")
            .await
            .expect("lookup");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn lookups_preserve_decimal_precision() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let make = insert_make(&pool, 1.25).await;
        let body_type = insert_body_type(&pool, 500.00).await;

        let multiple = repo.multiple_for_make(&make).await.expect("multiple");
        let premium = repo
            .premium_for_body_type(&body_type)
            .await
            .expect("premium");

        assert_eq!(multiple, Some(1.25));
        assert_eq!(premium, Some(500.00));
    }

    #[tokio::test]
    async fn lookup_fails_when_store_unreachable() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://127.0.0.1:1/premia_unreachable")
            .expect("lazy pool");
        let repo = PgRatingRepository::new(pool);

        let err = repo.multiple_for_make("any").await.unwrap_err();
        assert!(matches!(err, PremiaError::Database(_)));
    }
}
