// src/store/memory.rs
// DOCUMENTATION: In-memory store for tests and local development
// PURPOSE: Implement the PlaceStore interface over plain hash maps

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::PlaceStore;
use crate::errors::HbnbError;
use crate::models::{
    Amenity, NewAmenity, NewPlace, NewReview, NewUser, Place, PlaceUpdate, Review, User,
};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    places: HashMap<String, Place>,
    amenities: HashMap<String, Amenity>,
    reviews: HashMap<String, Review>,
    /// place_id -> linked amenity ids, in link order
    links: HashMap<String, Vec<String>>,
}

/// Hash-map backed store. Everything is lost on shutdown; selected with
/// STORE_BACKEND=memory and used as the fixture store by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with a demo host and a few amenities, so the seed
    /// binary and manual curl sessions work against a fresh process.
    /// Fixture ids are stable on purpose.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.insert_user(
            "demo-host",
            NewUser {
                first_name: "Demo".to_string(),
                last_name: "Host".to_string(),
                email: "demo@hbnb.local".to_string(),
                is_admin: true,
            },
        );
        for (id, name) in [("wifi", "WiFi"), ("pool", "Pool"), ("kitchen", "Kitchen")] {
            store.insert_amenity(id, NewAmenity { name: name.to_string() });
        }
        store
    }

    fn insert_user(&self, id: &str, new_user: NewUser) -> User {
        let now = Utc::now();
        let user = User {
            id: id.to_string(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            is_admin: new_user.is_admin,
            created_at: now,
            updated_at: now,
        };
        self.write().users.insert(user.id.clone(), user.clone());
        user
    }

    fn insert_amenity(&self, id: &str, new_amenity: NewAmenity) -> Amenity {
        let now = Utc::now();
        let amenity = Amenity {
            id: id.to_string(),
            name: new_amenity.name,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .amenities
            .insert(amenity.id.clone(), amenity.clone());
        amenity
    }

    /// Fixture helper: insert a user with a generated id
    pub fn add_user(&self, new_user: NewUser) -> User {
        self.insert_user(&Uuid::new_v4().to_string(), new_user)
    }

    /// Fixture helper: insert an amenity with a generated id
    pub fn add_amenity(&self, new_amenity: NewAmenity) -> Amenity {
        self.insert_amenity(&Uuid::new_v4().to_string(), new_amenity)
    }

    /// Fixture helper: insert a review (review creation lives in a
    /// different endpoint group, so the places API cannot do this itself)
    pub fn add_review(&self, new_review: NewReview) -> Review {
        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4().to_string(),
            text: new_review.text,
            rating: new_review.rating,
            user_id: new_review.user_id,
            place_id: new_review.place_id,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .reviews
            .insert(review.id.clone(), review.clone());
        review
    }

    /// Fixture helper: delete a user, leaving any of their reviews behind
    /// as dangling references
    pub fn remove_user(&self, id: &str) {
        self.write().users.remove(id);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn list_places(&self) -> Result<Vec<Place>, HbnbError> {
        let mut places: Vec<Place> = self.read().places.values().cloned().collect();
        places.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(places)
    }

    async fn get_place(&self, id: &str) -> Result<Option<Place>, HbnbError> {
        Ok(self.read().places.get(id).cloned())
    }

    async fn get_place_by_title(&self, title: &str) -> Result<Option<Place>, HbnbError> {
        Ok(self
            .read()
            .places
            .values()
            .find(|p| p.title == title)
            .cloned())
    }

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, HbnbError> {
        let mut inner = self.write();
        if !inner.users.contains_key(&new_place.owner_id) {
            return Err(HbnbError::Validation(format!(
                "Owner with id {} not found",
                new_place.owner_id
            )));
        }
        // Mirrors the unique constraint on places.title in the SQL schema
        if inner.places.values().any(|p| p.title == new_place.title) {
            return Err(HbnbError::Validation("Place already exist".to_string()));
        }
        let now = Utc::now();
        let place = Place {
            id: Uuid::new_v4().to_string(),
            title: new_place.title,
            description: new_place.description,
            price: new_place.price,
            latitude: new_place.latitude,
            longitude: new_place.longitude,
            owner_id: new_place.owner_id,
            created_at: now,
            updated_at: now,
        };
        inner.places.insert(place.id.clone(), place.clone());
        Ok(place)
    }

    async fn update_place(&self, id: &str, update: PlaceUpdate) -> Result<(), HbnbError> {
        let mut inner = self.write();
        let place = inner
            .places
            .get_mut(id)
            .ok_or_else(|| HbnbError::NotFound("Place not found".to_string()))?;
        if let Some(title) = update.title {
            place.title = title;
        }
        if let Some(description) = update.description {
            place.description = Some(description);
        }
        if let Some(price) = update.price {
            place.price = price;
        }
        if let Some(latitude) = update.latitude {
            place.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            place.longitude = longitude;
        }
        if let Some(owner_id) = update.owner_id {
            place.owner_id = owner_id;
        }
        place.updated_at = Utc::now();
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, HbnbError> {
        Ok(self.read().users.get(id).cloned())
    }

    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, HbnbError> {
        Ok(self.read().amenities.get(id).cloned())
    }

    async fn amenities_for_place(&self, place_id: &str) -> Result<Vec<Amenity>, HbnbError> {
        let inner = self.read();
        let ids = inner.links.get(place_id).cloned().unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| inner.amenities.get(id).cloned())
            .collect())
    }

    async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        let mut reviews: Vec<Review> = self
            .read()
            .reviews
            .values()
            .filter(|r| r.place_id == place_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(reviews)
    }

    async fn add_amenity_to_place(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(), HbnbError> {
        let mut inner = self.write();
        let links = inner.links.entry(place_id.to_string()).or_default();
        if links.iter().any(|id| id == amenity_id) {
            return Err(HbnbError::Conflict(
                "Amenity is already associated with this place".to_string(),
            ));
        }
        links.push(amenity_id.to_string());
        Ok(())
    }
}
