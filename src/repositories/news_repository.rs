use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::news::NewsArticle;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn insert(&self, article: &NewsArticle) -> AppResult<()>;

    /// Artículos publicados, del más reciente al más antiguo
    async fn list_published(&self, skip: i64, limit: i64) -> AppResult<Vec<NewsArticle>>;

    async fn find_published(&self, id: Uuid) -> AppResult<Option<NewsArticle>>;
}

pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn insert(&self, article: &NewsArticle) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO news (id, title, content, excerpt, image_url, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(article.id)
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.excerpt)
        .bind(&article.image_url)
        .bind(article.published)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_published(&self, skip: i64, limit: i64) -> AppResult<Vec<NewsArticle>> {
        let articles = sqlx::query_as::<_, NewsArticle>(
            r#"
            SELECT * FROM news
            WHERE published = TRUE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    async fn find_published(&self, id: Uuid) -> AppResult<Option<NewsArticle>> {
        let article = sqlx::query_as::<_, NewsArticle>(
            "SELECT * FROM news WHERE id = $1 AND published = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }
}
