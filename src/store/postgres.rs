// src/store/postgres.rs
// DOCUMENTATION: PostgreSQL-backed store - all SQL queries
// PURPOSE: Implement the PlaceStore interface over a sqlx connection pool
//
// Expected schema (text UUID keys, timestamptz stamps):
//
//   users          (id PK, first_name, last_name, email, is_admin,
//                   created_at, updated_at)
//   places         (id PK, title UNIQUE, description, price, latitude,
//                   longitude, owner_id FK -> users, created_at, updated_at)
//   amenities      (id PK, name, created_at, updated_at)
//   reviews        (id PK, text, rating, user_id, place_id FK -> places,
//                   created_at, updated_at)
//   place_amenities (place_id FK, amenity_id FK, created_at,
//                   PRIMARY KEY (place_id, amenity_id))

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::PlaceStore;
use crate::errors::HbnbError;
use crate::models::{Amenity, NewPlace, Place, PlaceUpdate, Review, User};

/// PostgreSQL implementation of the store interface
pub struct PgPlaceStore {
    pool: PgPool,
}

impl PgPlaceStore {
    pub fn new(pool: PgPool) -> Self {
        PgPlaceStore { pool }
    }
}

/// Unique-constraint violations (PostgreSQL error code 23505) are surfaced
/// as domain errors so the handlers' check-then-act sequences degrade to a
/// client error instead of a 500 when two requests race
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn db_error(context: &str, err: sqlx::Error) -> HbnbError {
    log::error!("{}: {}", context, err);
    HbnbError::Database(err.to_string())
}

#[async_trait]
impl PlaceStore for PgPlaceStore {
    async fn list_places(&self) -> Result<Vec<Place>, HbnbError> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, title, description, price, latitude, longitude,
                   owner_id, created_at, updated_at
            FROM places
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list places", e))
    }

    async fn get_place(&self, id: &str) -> Result<Option<Place>, HbnbError> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, title, description, price, latitude, longitude,
                   owner_id, created_at, updated_at
            FROM places
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch place", e))
    }

    async fn get_place_by_title(&self, title: &str) -> Result<Option<Place>, HbnbError> {
        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, title, description, price, latitude, longitude,
                   owner_id, created_at, updated_at
            FROM places
            WHERE title = $1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch place by title", e))
    }

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, HbnbError> {
        if self.get_user(&new_place.owner_id).await?.is_none() {
            return Err(HbnbError::Validation(format!(
                "Owner with id {} not found",
                new_place.owner_id
            )));
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO places (
                id, title, description, price, latitude, longitude,
                owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            "#,
        )
        .bind(&id) // $1
        .bind(&new_place.title) // $2
        .bind(&new_place.description) // $3
        .bind(new_place.price) // $4
        .bind(new_place.latitude) // $5
        .bind(new_place.longitude) // $6
        .bind(&new_place.owner_id) // $7
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HbnbError::Validation("Place already exist".to_string())
            } else {
                db_error("Failed to create place", e)
            }
        })?;

        let place = self
            .get_place(&id)
            .await?
            .ok_or_else(|| HbnbError::Database("created place vanished".to_string()))?;
        log::info!("Created place {} ({})", place.id, place.title);
        Ok(place)
    }

    async fn update_place(&self, id: &str, update: PlaceUpdate) -> Result<(), HbnbError> {
        let result = sqlx::query(
            r#"
            UPDATE places
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                owner_id = COALESCE($7, owner_id),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id) // $1
        .bind(&update.title) // $2
        .bind(&update.description) // $3
        .bind(update.price) // $4
        .bind(update.latitude) // $5
        .bind(update.longitude) // $6
        .bind(&update.owner_id) // $7
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HbnbError::Validation("Place already exist".to_string())
            } else {
                db_error("Failed to update place", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(HbnbError::NotFound("Place not found".to_string()));
        }
        log::info!("Updated place {}", id);
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, HbnbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, is_admin,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))
    }

    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM amenities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch amenity", e))
    }

    async fn amenities_for_place(&self, place_id: &str) -> Result<Vec<Amenity>, HbnbError> {
        sqlx::query_as::<_, Amenity>(
            r#"
            SELECT a.id, a.name, a.created_at, a.updated_at
            FROM amenities a
            JOIN place_amenities pa ON pa.amenity_id = a.id
            WHERE pa.place_id = $1
            ORDER BY pa.created_at
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch place amenities", e))
    }

    async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, text, rating, user_id, place_id, created_at, updated_at
            FROM reviews
            WHERE place_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch place reviews", e))
    }

    async fn add_amenity_to_place(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<(), HbnbError> {
        sqlx::query(
            r#"
            INSERT INTO place_amenities (place_id, amenity_id, created_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(place_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HbnbError::Conflict("Amenity is already associated with this place".to_string())
            } else {
                db_error("Failed to link amenity", e)
            }
        })?;

        log::info!("Linked amenity {} to place {}", amenity_id, place_id);
        Ok(())
    }
}
