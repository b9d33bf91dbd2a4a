// src/models/user.rs
// DOCUMENTATION: User entity and the owner DTOs embedded in place responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A platform user as read from the store
/// DOCUMENTATION: The admin flag lives on the entity for completeness, but
/// authorization decisions consume the JWT claim, never this field
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner summary embedded in the place listing
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Full owner block on the place detail view
#[derive(Debug, Clone, Serialize)]
pub struct OwnerDetail {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn to_summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn to_detail(&self) -> OwnerDetail {
        OwnerDetail {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }

    /// Denormalized display name used in review listings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a user through the store (seed/tests only; the
/// places API itself never creates users)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}
