use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::testimonial::Testimonial;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn insert(&self, testimonial: &Testimonial) -> AppResult<()>;

    async fn list_published(&self) -> AppResult<Vec<Testimonial>>;
}

pub struct PgTestimonialRepository {
    pool: PgPool,
}

impl PgTestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialRepository for PgTestimonialRepository {
    async fn insert(&self, testimonial: &Testimonial) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO testimonials (id, name, content, rating, published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(testimonial.id)
        .bind(&testimonial.name)
        .bind(&testimonial.content)
        .bind(testimonial.rating)
        .bind(testimonial.published)
        .bind(testimonial.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_published(&self) -> AppResult<Vec<Testimonial>> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE published = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }
}
