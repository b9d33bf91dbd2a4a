// src/store/mod.rs
// DOCUMENTATION: Store module organization
// PURPOSE: Define the persistence interface the handlers depend on and
// re-export its implementations

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgPlaceStore;

use async_trait::async_trait;

use crate::errors::HbnbError;
use crate::models::{Amenity, NewPlace, Place, PlaceUpdate, Review, User};

/// Persistence capability set consumed by the places handlers.
///
/// Handlers receive this as an injected trait object and never talk to a
/// concrete backend. Lookup methods return `Ok(None)` for missing records;
/// `Err` is reserved for backend failures and store-level validation.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    async fn list_places(&self) -> Result<Vec<Place>, HbnbError>;

    async fn get_place(&self, id: &str) -> Result<Option<Place>, HbnbError>;

    async fn get_place_by_title(&self, title: &str) -> Result<Option<Place>, HbnbError>;

    /// Create a place. Fails with a validation error if the owner does not
    /// exist or the title is already taken (backends enforce the latter so
    /// the handler's check-then-act degrades safely under races).
    async fn create_place(&self, new_place: NewPlace) -> Result<Place, HbnbError>;

    /// Apply a validated partial update. Fails with not-found if the place
    /// disappeared between the handler's lookup and this call.
    async fn update_place(&self, id: &str, update: PlaceUpdate) -> Result<(), HbnbError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, HbnbError>;

    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, HbnbError>;

    async fn amenities_for_place(&self, place_id: &str) -> Result<Vec<Amenity>, HbnbError>;

    async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>, HbnbError>;

    /// Link an amenity to a place. Fails with a conflict if the link
    /// already exists.
    async fn add_amenity_to_place(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(), HbnbError>;
}
