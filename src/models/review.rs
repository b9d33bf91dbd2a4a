// src/models/review.rs
// DOCUMENTATION: Review entity and the enriched review DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::User;

/// Sentinel substituted when a review's author no longer exists.
/// Reviews are never dropped because of a missing user.
pub const DELETED_USER_ID: &str = "unknown";
pub const DELETED_USER_FIRST_NAME: &str = "Deleted";
pub const DELETED_USER_LAST_NAME: &str = "User";

/// A review as read from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: String,
    pub text: String,
    pub rating: i32,
    pub user_id: String,
    pub place_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author summary nested inside the place detail view
#[derive(Debug, Clone, Serialize)]
pub struct ReviewUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl ReviewUser {
    /// Placeholder author for reviews whose user was deleted
    pub fn deleted() -> Self {
        ReviewUser {
            id: DELETED_USER_ID.to_string(),
            first_name: DELETED_USER_FIRST_NAME.to_string(),
            last_name: DELETED_USER_LAST_NAME.to_string(),
        }
    }
}

impl From<&User> for ReviewUser {
    fn from(user: &User) -> Self {
        ReviewUser {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Review enriched with its author, for GET /places/{id}
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithUser {
    pub id: String,
    pub text: String,
    pub rating: i32,
    pub user: ReviewUser,
}

/// Review enriched with a denormalized display name, for
/// GET /places/{id}/reviews
#[derive(Debug, Clone, Serialize)]
pub struct ReviewListItem {
    pub id: String,
    pub text: String,
    pub rating: i32,
    pub user_id: String,
    pub user_name: String,
}

impl Review {
    pub fn with_user(&self, user: Option<&User>) -> ReviewWithUser {
        ReviewWithUser {
            id: self.id.clone(),
            text: self.text.clone(),
            rating: self.rating,
            user: match user {
                Some(user) => ReviewUser::from(user),
                None => ReviewUser::deleted(),
            },
        }
    }

    pub fn to_list_item(&self, user: Option<&User>) -> ReviewListItem {
        ReviewListItem {
            id: self.id.clone(),
            text: self.text.clone(),
            rating: self.rating,
            user_id: self.user_id.clone(),
            user_name: match user {
                Some(user) => user.display_name(),
                None => format!("{} {}", DELETED_USER_FIRST_NAME, DELETED_USER_LAST_NAME),
            },
        }
    }
}

/// Input for creating a review through the store (seed/tests only; review
/// creation has its own endpoint group outside this service)
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub user_id: String,
    pub place_id: String,
}
