// src/models/amenity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An amenity that can be linked to places
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Amenity view returned by the places API: (id, name) pairs only
#[derive(Debug, Clone, Serialize)]
pub struct AmenityView {
    pub id: String,
    pub name: String,
}

impl Amenity {
    pub fn to_view(&self) -> AmenityView {
        AmenityView {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Request body for POST /places/{id}/amenities
/// DOCUMENTATION: amenity_id is optional at the type level so a missing or
/// blank value maps to the "Amenity ID is required" client error instead of
/// a framework deserialization failure
#[derive(Debug, Clone, Deserialize)]
pub struct AmenityLinkRequest {
    pub amenity_id: Option<String>,
}

/// Input for creating an amenity through the store (seed/tests only)
#[derive(Debug, Clone, Deserialize)]
pub struct NewAmenity {
    pub name: String,
}
