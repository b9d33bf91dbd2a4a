// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for the places endpoint group
// PURPOSE: Parse requests, validate, call the store, shape responses

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::{Validate, ValidationErrors};

use crate::auth::AuthUser;
use crate::errors::HbnbError;
use crate::models::{
    Amenity, AmenityLinkRequest, CreatePlaceRequest, NewPlace, UpdatePlaceRequest,
};
use crate::store::PlaceStore;

/// Create and update must never surface a server error: anything that is
/// not already a client-facing failure collapses to 400 "Invalid input data"
fn invalid_input(err: HbnbError) -> HbnbError {
    match err {
        HbnbError::Validation(_) | HbnbError::NotFound(_) | HbnbError::Conflict(_) => err,
        other => {
            log::warn!("Store failure collapsed to client error: {}", other);
            HbnbError::InvalidInput("Invalid input data".to_string())
        }
    }
}

/// Surface the bare message of the first failed field check, the same
/// text shape the update path emits
fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flat_map(|field| field.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| errors.to_string())
}

/// GET /places
/// List all places as summaries. No auth.
pub async fn list_places(store: web::Data<dyn PlaceStore>) -> Result<impl Responder, HbnbError> {
    let places = store.list_places().await?;
    let mut summaries = Vec::with_capacity(places.len());
    for place in places {
        // A summary with a missing owner is emitted with owner: null
        let owner = store.get_user(&place.owner_id).await?;
        summaries.push(place.to_summary(owner.as_ref()));
    }
    Ok(HttpResponse::Ok().json(summaries))
}

/// POST /places
/// Register a new place. The authenticated caller always becomes the
/// owner, regardless of any owner_id in the payload.
pub async fn create_place(
    store: web::Data<dyn PlaceStore>,
    auth: AuthUser,
    req: web::Json<CreatePlaceRequest>,
) -> Result<impl Responder, HbnbError> {
    if let Err(e) = req.validate() {
        return Err(HbnbError::Validation(first_validation_message(&e)));
    }

    // Lookup failures collapse to a client error, like the insert below
    if store
        .get_place_by_title(&req.title)
        .await
        .map_err(invalid_input)?
        .is_some()
    {
        return Err(HbnbError::Validation("Place already exist".to_string()));
    }

    let new_place = NewPlace::from_request(req.into_inner(), &auth.user_id);
    let place = store.create_place(new_place).await.map_err(invalid_input)?;

    log::info!("User {} created place {}", auth.user_id, place.id);
    Ok(HttpResponse::Created().json(place.to_created_response()))
}

/// GET /places/{place_id}
/// Full place view: scalar fields, owner, amenities, enriched reviews.
/// No auth.
pub async fn get_place(
    store: web::Data<dyn PlaceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, HbnbError> {
    let place_id = path.into_inner();

    let place = store
        .get_place(&place_id)
        .await?
        .ok_or_else(|| HbnbError::NotFound("Place not found".to_string()))?;

    // A dangling owner reference on the place itself is a hard failure,
    // unlike a dangling review author
    let owner = store
        .get_user(&place.owner_id)
        .await?
        .ok_or_else(|| HbnbError::NotFound("Place owner not found".to_string()))?;

    let amenities = store
        .amenities_for_place(&place.id)
        .await?
        .iter()
        .map(Amenity::to_view)
        .collect();

    let reviews = store.reviews_for_place(&place.id).await?;
    let mut enriched = Vec::with_capacity(reviews.len());
    for review in &reviews {
        // Deleted authors degrade to the placeholder user; the review
        // itself is always kept
        let user = store.get_user(&review.user_id).await?;
        enriched.push(review.with_user(user.as_ref()));
    }

    Ok(HttpResponse::Ok().json(place.to_detail(&owner, amenities, enriched)))
}

/// PUT /places/{place_id}
/// Update a place. Owner or admin only. Every present field is validated
/// before any store call so a failed check never leaves a partial write.
pub async fn update_place(
    store: web::Data<dyn PlaceStore>,
    auth: AuthUser,
    path: web::Path<String>,
    req: web::Json<UpdatePlaceRequest>,
) -> Result<impl Responder, HbnbError> {
    let place_id = path.into_inner();

    let place = store
        .get_place(&place_id)
        .await?
        .ok_or_else(|| HbnbError::NotFound("Place not found".to_string()))?;

    if !auth.can_manage(&place.owner_id) {
        return Err(HbnbError::Forbidden);
    }

    let update = req.validated()?;

    if let Some(owner_id) = &update.owner_id {
        if store.get_user(owner_id).await?.is_none() {
            return Err(HbnbError::Validation(format!(
                "Owner with id {} not found",
                owner_id
            )));
        }
    }

    store
        .update_place(&place_id, update)
        .await
        .map_err(invalid_input)?;

    log::info!("User {} updated place {}", auth.user_id, place_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Place updated successfully" })))
}

/// GET /places/{place_id}/reviews
/// All reviews for a place with a denormalized author display name.
/// No auth.
pub async fn list_place_reviews(
    store: web::Data<dyn PlaceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, HbnbError> {
    let place_id = path.into_inner();

    if store.get_place(&place_id).await?.is_none() {
        return Err(HbnbError::NotFound("Place not found".to_string()));
    }

    let reviews = store.reviews_for_place(&place_id).await?;
    let mut items = Vec::with_capacity(reviews.len());
    for review in &reviews {
        let user = store.get_user(&review.user_id).await?;
        items.push(review.to_list_item(user.as_ref()));
    }
    Ok(HttpResponse::Ok().json(items))
}

/// GET /places/{place_id}/amenities
/// Amenity (id, name) pairs for a place. No auth.
pub async fn list_place_amenities(
    store: web::Data<dyn PlaceStore>,
    path: web::Path<String>,
) -> Result<impl Responder, HbnbError> {
    let place_id = path.into_inner();

    // Routing normally guarantees a non-empty id; kept as a defensive check
    if place_id.trim().is_empty() {
        return Err(HbnbError::Validation("Place ID is required".to_string()));
    }

    if store.get_place(&place_id).await?.is_none() {
        return Err(HbnbError::NotFound("Place not found".to_string()));
    }

    let amenities: Vec<_> = store
        .amenities_for_place(&place_id)
        .await?
        .iter()
        .map(Amenity::to_view)
        .collect();
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /places/{place_id}/amenities
/// Link an amenity to a place. Owner or admin only. Re-linking an already
/// linked amenity is rejected with a conflict, not silently accepted.
pub async fn add_place_amenity(
    store: web::Data<dyn PlaceStore>,
    auth: AuthUser,
    path: web::Path<String>,
    body: web::Json<AmenityLinkRequest>,
) -> Result<impl Responder, HbnbError> {
    let place_id = path.into_inner();

    let amenity_id = match body.amenity_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(HbnbError::Validation("Amenity ID is required".to_string())),
    };

    let place = store
        .get_place(&place_id)
        .await?
        .ok_or_else(|| HbnbError::NotFound("Place not found".to_string()))?;

    if !auth.can_manage(&place.owner_id) {
        return Err(HbnbError::Forbidden);
    }

    if store.get_amenity(&amenity_id).await?.is_none() {
        return Err(HbnbError::NotFound("Amenity not found".to_string()));
    }

    let linked = store.amenities_for_place(&place_id).await?;
    if linked.iter().any(|a| a.id == amenity_id) {
        return Err(HbnbError::Conflict(
            "Amenity is already associated with this place".to_string(),
        ));
    }

    store.add_amenity_to_place(&place_id, &amenity_id).await?;

    log::info!(
        "User {} linked amenity {} to place {}",
        auth.user_id,
        amenity_id,
        place_id
    );
    Ok(HttpResponse::Created().json(json!({ "message": "Amenity successfully added to place" })))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("", web::get().to(list_places))
            .route("", web::post().to(create_place))
            .route("/{place_id}", web::get().to(get_place))
            .route("/{place_id}", web::put().to(update_place))
            .route("/{place_id}/reviews", web::get().to(list_place_reviews))
            .route("/{place_id}/amenities", web::get().to(list_place_amenities))
            .route("/{place_id}/amenities", web::post().to(add_place_amenity)),
    );
}
