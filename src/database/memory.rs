//! Almacén en memoria
//!
//! Implementa todos los repositorios sobre vectores protegidos por
//! `RwLock`. Se selecciona con `DATABASE_URL=memory` y es el backend de los
//! tests de integración. Conserva el orden de inserción, que es el orden de
//! almacenamiento usado para desempatar.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::contact::ContactMessage;
use crate::models::news::NewsArticle;
use crate::models::testimonial::Testimonial;
use crate::models::user::User;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::{
    ContactRepository, NewsRepository, TestimonialRepository, UserRepository, VehicleChange,
    VehicleRepository,
};
use crate::services::vehicle_query::VehicleQuery;
use crate::utils::errors::AppResult;

#[derive(Debug, Default)]
pub struct MemoryStore {
    vehicles: RwLock<Vec<Vehicle>>,
    news: RwLock<Vec<NewsArticle>>,
    testimonials: RwLock<Vec<Testimonial>>,
    contacts: RwLock<Vec<ContactMessage>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T>(items: Vec<T>, skip: i64, limit: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(skip.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<()> {
        self.vehicles.write().await.push(vehicle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_id_or_slug(&self, key: &str) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let by_id = Uuid::parse_str(key)
            .ok()
            .and_then(|id| vehicles.iter().find(|v| v.id == id));

        Ok(by_id
            .or_else(|| vehicles.iter().find(|v| v.slug == key))
            .cloned())
    }

    async fn search(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(query.apply(vehicles.iter().cloned()))
    }

    async fn update(&self, id: Uuid, change: VehicleChange) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles.iter_mut().find(|v| v.id == id).map(|vehicle| {
            change.apply_to(vehicle);
            vehicle.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles
            .iter()
            .position(|v| v.id == id)
            .map(|index| vehicles.remove(index)))
    }

    async fn count(&self, status: Option<VehicleStatus>) -> AppResult<i64> {
        let vehicles = self.vehicles.read().await;
        let count = vehicles
            .iter()
            .filter(|v| status.map_or(true, |s| v.details.status == s))
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl NewsRepository for MemoryStore {
    async fn insert(&self, article: &NewsArticle) -> AppResult<()> {
        self.news.write().await.push(article.clone());
        Ok(())
    }

    async fn list_published(&self, skip: i64, limit: i64) -> AppResult<Vec<NewsArticle>> {
        let mut published: Vec<NewsArticle> = self
            .news
            .read()
            .await
            .iter()
            .filter(|a| a.published)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(published, skip, limit))
    }

    async fn find_published(&self, id: Uuid) -> AppResult<Option<NewsArticle>> {
        let news = self.news.read().await;
        Ok(news.iter().find(|a| a.id == id && a.published).cloned())
    }
}

#[async_trait]
impl TestimonialRepository for MemoryStore {
    async fn insert(&self, testimonial: &Testimonial) -> AppResult<()> {
        self.testimonials.write().await.push(testimonial.clone());
        Ok(())
    }

    async fn list_published(&self) -> AppResult<Vec<Testimonial>> {
        let mut published: Vec<Testimonial> = self
            .testimonials
            .read()
            .await
            .iter()
            .filter(|t| t.published)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(published)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn insert(&self, message: &ContactMessage) -> AppResult<()> {
        self.contacts.write().await.push(message.clone());
        Ok(())
    }

    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<ContactMessage>> {
        let mut messages = self.contacts.read().await.clone();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(messages, skip, limit))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.contacts.read().await.len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::CreateNewsRequest;
    use crate::services::vehicle_query::{SortField, SortOrder, VehicleFilter};
    use crate::test_helpers::{sample_details, vehicle_with};
    use chrono::Duration;

    #[tokio::test]
    async fn test_slug_lookup_returns_first_inserted() {
        let store = MemoryStore::new();
        let first = Vehicle::new(sample_details());
        let second = Vehicle::new(sample_details());
        VehicleRepository::insert(&store, &first).await.unwrap();
        VehicleRepository::insert(&store, &second).await.unwrap();

        let found = store.find_by_id_or_slug("2023-bmw-x5").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);

        let found = store
            .find_by_id_or_slug(&second.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);

        assert!(store.find_by_id_or_slug("no-existe").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();
        let updated = store
            .update(missing, VehicleChange::images(Vec::new()))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(VehicleRepository::delete(&store, missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_and_counts() {
        let store = MemoryStore::new();
        for vehicle in [
            vehicle_with("BMW", 2023, 72000.0, VehicleStatus::Available),
            vehicle_with("Audi", 2019, 25000.0, VehicleStatus::Sold),
            vehicle_with("Seat", 2015, 9000.0, VehicleStatus::Hidden),
        ] {
            VehicleRepository::insert(&store, &vehicle).await.unwrap();
        }

        let query = VehicleQuery::build(
            &VehicleFilter::default(),
            SortField::Price,
            SortOrder::Desc,
            0,
            20,
        );
        let result = store.search(&query).await.unwrap();
        let brands: Vec<&str> = result.iter().map(|v| v.details.brand.as_str()).collect();
        assert_eq!(brands, vec!["BMW", "Audi"]);

        assert_eq!(VehicleRepository::count(&store, None).await.unwrap(), 3);
        assert_eq!(
            VehicleRepository::count(&store, Some(VehicleStatus::Sold)).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_news_lists_only_published_newest_first() {
        let store = MemoryStore::new();
        let request = |title: &str, published: bool| CreateNewsRequest {
            title: title.to_string(),
            content: "contenido".to_string(),
            excerpt: String::new(),
            image_url: None,
            published,
        };

        let mut older = NewsArticle::new(request("antigua", true));
        older.created_at -= Duration::hours(1);
        let newer = NewsArticle::new(request("nueva", true));
        let draft = NewsArticle::new(request("borrador", false));
        for article in [&older, &newer, &draft] {
            NewsRepository::insert(&store, article).await.unwrap();
        }

        let titles: Vec<String> = NewsRepository::list_published(&store, 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["nueva", "antigua"]);
        assert!(store.find_published(draft.id).await.unwrap().is_none());
        assert!(store.find_published(older.id).await.unwrap().is_some());
    }
}
