// src/models/place.rs
// DOCUMENTATION: Place entity plus all request/response DTOs for the
// places endpoint group
// PURPOSE: Keep wire shapes separate from the stored entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::{AmenityView, OwnerDetail, OwnerSummary, ReviewWithUser, User};
use crate::errors::HbnbError;

/// A place as read from the store
/// DOCUMENTATION: owner/amenities/reviews are relations resolved through
/// separate store calls, never embedded here
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /places
/// DOCUMENTATION: owner_id in the payload is accepted but ignored; the
/// authenticated caller always becomes the owner
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(custom = "validate_title")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(custom = "validate_price")]
    pub price: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[serde(default)]
    pub owner_id: Option<String>,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title");
        err.message = Some("Title cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        let mut err = ValidationError::new("price");
        err.message = Some("Price must be a positive number".into());
        return Err(err);
    }
    Ok(())
}

/// Request DTO for PUT /places/{id}
/// DOCUMENTATION: every field is independently optional; only fields
/// present in the payload are validated and forwarded to the store.
/// Numeric fields are `Value` so a payload may carry them as JSON numbers
/// or numeric strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub owner_id: Option<String>,
}

/// Validated field set handed to the store's update operation
#[derive(Debug, Clone, Default)]
pub struct PlaceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Option<String>,
}

/// Coerce a JSON value into a float: numbers pass through, numeric
/// strings are parsed
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

impl UpdatePlaceRequest {
    /// Validate each present field and produce the store-level update.
    /// Short-circuits on the first failing field with its exact message.
    /// Owner existence is checked by the caller against the store.
    pub fn validated(&self) -> Result<PlaceUpdate, HbnbError> {
        let mut update = PlaceUpdate::default();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(HbnbError::Validation("Title cannot be empty".to_string()));
            }
            update.title = Some(title.clone());
        }

        update.description = self.description.clone();

        if let Some(price) = &self.price {
            match as_number(price) {
                Some(price) if price.is_finite() && price > 0.0 => update.price = Some(price),
                _ => {
                    return Err(HbnbError::Validation(
                        "Price must be a positive number".to_string(),
                    ))
                }
            }
        }

        if let Some(latitude) = &self.latitude {
            match as_number(latitude) {
                Some(latitude) if (-90.0..=90.0).contains(&latitude) => {
                    update.latitude = Some(latitude)
                }
                _ => {
                    return Err(HbnbError::Validation(
                        "Latitude must be between -90 and 90".to_string(),
                    ))
                }
            }
        }

        if let Some(longitude) = &self.longitude {
            match as_number(longitude) {
                Some(longitude) if (-180.0..=180.0).contains(&longitude) => {
                    update.longitude = Some(longitude)
                }
                _ => {
                    return Err(HbnbError::Validation(
                        "Longitude must be between -180 and 180".to_string(),
                    ))
                }
            }
        }

        update.owner_id = self.owner_id.clone();

        Ok(update)
    }
}

/// Input for creating a place through the store
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
}

impl NewPlace {
    /// Bind a create request to the authenticated caller
    pub fn from_request(req: CreatePlaceRequest, owner_id: &str) -> Self {
        NewPlace {
            title: req.title,
            description: req.description,
            price: req.price,
            latitude: req.latitude,
            longitude: req.longitude,
            owner_id: owner_id.to_string(),
        }
    }
}

/// Response DTO for POST /places: scalar fields only, no relations
#[derive(Debug, Clone, Serialize)]
pub struct PlaceCreatedResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
}

/// Summary DTO for GET /places
/// DOCUMENTATION: owner is nullable; a place whose owner cannot be
/// resolved still appears in the listing
#[derive(Debug, Clone, Serialize)]
pub struct PlaceSummary {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: Option<OwnerSummary>,
}

/// Full view DTO for GET /places/{id}
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetailResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: OwnerDetail,
    pub amenities: Vec<AmenityView>,
    pub reviews: Vec<ReviewWithUser>,
}

impl Place {
    pub fn to_created_response(&self) -> PlaceCreatedResponse {
        PlaceCreatedResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            owner_id: self.owner_id.clone(),
        }
    }

    pub fn to_summary(&self, owner: Option<&User>) -> PlaceSummary {
        PlaceSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            owner: owner.map(User::to_summary),
        }
    }

    pub fn to_detail(
        &self,
        owner: &User,
        amenities: Vec<AmenityView>,
        reviews: Vec<ReviewWithUser>,
    ) -> PlaceDetailResponse {
        PlaceDetailResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
            owner: owner.to_detail(),
            amenities,
            reviews,
        }
    }
}
