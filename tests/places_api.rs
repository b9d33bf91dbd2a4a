// tests/places_api.rs
// End-to-end tests for the places endpoint group, run against the
// in-memory store with locally minted bearer tokens.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use serde_json::{json, Value};

use hbnb_places::auth::mint_token;
use hbnb_places::config::Config;
use hbnb_places::errors::json_error_handler;
use hbnb_places::handlers;
use hbnb_places::models::{NewAmenity, NewReview, NewUser, User};
use hbnb_places::store::{MemoryStore, PlaceStore};

macro_rules! init_app {
    ($store:expr) => {
        test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(Config::for_tests()))
                .app_data(web::Data::from($store.clone() as Arc<dyn PlaceStore>))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(handlers::places_config)
                .configure(handlers::health_config),
        )
        .await
    };
}

fn token_for(user: &User) -> String {
    mint_token(&Config::for_tests().jwt_secret, &user.id, user.is_admin).unwrap()
}

fn host(store: &MemoryStore) -> User {
    store.add_user(NewUser {
        first_name: "Ana".to_string(),
        last_name: "Garcia".to_string(),
        email: "ana@example.com".to_string(),
        is_admin: false,
    })
}

fn stranger(store: &MemoryStore) -> User {
    store.add_user(NewUser {
        first_name: "Sam".to_string(),
        last_name: "Stranger".to_string(),
        email: "sam@example.com".to_string(),
        is_admin: false,
    })
}

fn admin(store: &MemoryStore) -> User {
    store.add_user(NewUser {
        first_name: "Ada".to_string(),
        last_name: "Admin".to_string(),
        email: "ada@example.com".to_string(),
        is_admin: true,
    })
}

fn cabin_payload() -> Value {
    json!({
        "title": "Cabin",
        "price": 100,
        "latitude": 10,
        "longitude": 10
    })
}

fn post_place(token: &str, body: &Value) -> TestRequest {
    TestRequest::post()
        .uri("/places")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(body)
}

fn put_place(token: &str, place_id: &str, body: &Value) -> TestRequest {
    TestRequest::put()
        .uri(&format!("/places/{}", place_id))
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(body)
}

fn post_amenity(token: &str, place_id: &str, body: &Value) -> TestRequest {
    TestRequest::post()
        .uri(&format!("/places/{}/amenities", place_id))
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(body)
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(store);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn create_place_assigns_caller_as_owner() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    // A caller-supplied owner_id must be ignored
    let mut payload = cabin_payload();
    payload["owner_id"] = json!("someone-else");

    let resp = test::call_service(&app, post_place(&token_for(&owner), &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["owner_id"], json!(owner.id));
    assert_eq!(body["title"], "Cabin");
    assert_eq!(body["price"], json!(100.0));
    assert!(body["id"].as_str().is_some());
    // Created response carries scalar fields only
    assert!(body.get("reviews").is_none());
    assert!(body.get("amenities").is_none());
}

#[actix_web::test]
async fn create_place_with_duplicate_title_fails() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same title, different fields: still a duplicate
    let mut payload = cabin_payload();
    payload["price"] = json!(999);
    let resp = test::call_service(&app, post_place(&token, &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place already exist" }));
}

#[actix_web::test]
async fn create_place_requires_authentication() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(store);

    let req = TestRequest::post()
        .uri("/places")
        .set_json(cabin_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_place_rejects_out_of_range_coordinates() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let mut payload = cabin_payload();
    payload["latitude"] = json!(91);
    let resp = test::call_service(&app, post_place(&token_for(&owner), &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Latitude must be between -90 and 90" }));
}

#[actix_web::test]
async fn create_place_with_malformed_payload_keeps_error_shape() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    // Missing required field
    let payload = json!({ "price": 100, "latitude": 10, "longitude": 10 });
    let resp = test::call_service(&app, post_place(&token, &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid input data" }));

    // Body that is not JSON at all
    let req = TestRequest::post()
        .uri("/places")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid input data" }));
}

#[actix_web::test]
async fn create_place_rejects_bad_fields_with_bare_messages() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let mut payload = cabin_payload();
    payload["price"] = json!(-1);
    let resp = test::call_service(&app, post_place(&token, &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Price must be a positive number" }));

    let mut payload = cabin_payload();
    payload["title"] = json!("   ");
    let resp = test::call_service(&app, post_place(&token, &payload).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Title cannot be empty" }));
}

#[actix_web::test]
async fn list_places_returns_summaries() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, TestRequest::get().uri("/places").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let places = body.as_array().unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0]["title"], "Cabin");
    assert_eq!(places[0]["owner"]["first_name"], "Ana");
    // Summaries never expose the owner's email
    assert!(places[0]["owner"].get("email").is_none());
}

#[actix_web::test]
async fn list_places_tolerates_missing_owner() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    store.remove_user(&owner.id);

    let resp = test::call_service(&app, TestRequest::get().uri("/places").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["owner"], Value::Null);
}

#[actix_web::test]
async fn get_place_returns_full_view() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let guest = stranger(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let wifi = store.add_amenity(NewAmenity {
        name: "WiFi".to_string(),
    });
    let resp = test::call_service(
        &app,
        post_amenity(&token, &place_id, &json!({ "amenity_id": wifi.id })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    store.add_review(NewReview {
        text: "Lovely place".to_string(),
        rating: 5,
        user_id: guest.id.clone(),
        place_id: place_id.clone(),
    });

    let req = TestRequest::get()
        .uri(&format!("/places/{}", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["owner"]["email"], "ana@example.com");
    assert_eq!(body["amenities"][0]["name"], "WiFi");
    assert_eq!(body["reviews"][0]["rating"], 5);
    assert_eq!(body["reviews"][0]["user"]["first_name"], "Sam");
}

#[actix_web::test]
async fn get_missing_place_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(store);

    let req = TestRequest::get().uri("/places/no-such-place").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place not found" }));
}

#[actix_web::test]
async fn get_place_with_missing_owner_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();
    store.remove_user(&owner.id);

    let req = TestRequest::get()
        .uri(&format!("/places/{}", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place owner not found" }));
}

#[actix_web::test]
async fn deleted_review_author_becomes_placeholder() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let guest = stranger(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    store.add_review(NewReview {
        text: "Would stay again".to_string(),
        rating: 4,
        user_id: guest.id.clone(),
        place_id: place_id.clone(),
    });
    store.remove_user(&guest.id);

    // Full view substitutes the sentinel user, never drops the review
    let req = TestRequest::get()
        .uri(&format!("/places/{}", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["reviews"][0]["user"]["id"], "unknown");
    assert_eq!(body["reviews"][0]["user"]["first_name"], "Deleted");

    // Reviews listing falls back to the placeholder display name
    let req = TestRequest::get()
        .uri(&format!("/places/{}/reviews", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["user_name"], "Deleted User");
    assert_eq!(body[0]["text"], "Would stay again");
}

#[actix_web::test]
async fn reviews_listing_resolves_display_names() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let guest = stranger(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    store.add_review(NewReview {
        text: "Spotless".to_string(),
        rating: 5,
        user_id: guest.id.clone(),
        place_id: place_id.clone(),
    });

    let req = TestRequest::get()
        .uri(&format!("/places/{}/reviews", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["user_name"], "Sam Stranger");
    assert_eq!(body[0]["user_id"], json!(guest.id));
}

#[actix_web::test]
async fn reviews_for_missing_place_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(store);

    let req = TestRequest::get().uri("/places/ghost/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place not found" }));
}

#[actix_web::test]
async fn owner_can_update_place() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token, &place_id, &json!({ "price": "150", "title": "Cabin Deluxe" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Place updated successfully" }));

    let req = TestRequest::get()
        .uri(&format!("/places/{}", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Cabin Deluxe");
    assert_eq!(body["price"], json!(150.0));
}

#[actix_web::test]
async fn update_rejects_negative_price_without_mutation() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token, &place_id, &json!({ "price": -5 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Price must be a positive number" }));

    let place = store.get_place(&place_id).await.unwrap().unwrap();
    assert_eq!(place.price, 100.0);
}

#[actix_web::test]
async fn update_rejects_out_of_range_coordinates_without_mutation() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token, &place_id, &json!({ "latitude": 120 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Latitude must be between -90 and 90" }));

    let resp = test::call_service(
        &app,
        put_place(&token, &place_id, &json!({ "longitude": -200 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Longitude must be between -180 and 180" }));

    let place = store.get_place(&place_id).await.unwrap().unwrap();
    assert_eq!(place.latitude, 10.0);
    assert_eq!(place.longitude, 10.0);
}

#[actix_web::test]
async fn update_by_stranger_is_forbidden() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let other = stranger(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token_for(&other), &place_id, &json!({ "title": "Hijacked" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Unauthorized action" }));

    let place = store.get_place(&place_id).await.unwrap().unwrap();
    assert_eq!(place.title, "Cabin");
}

#[actix_web::test]
async fn admin_can_update_any_place() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let root = admin(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token_for(&root), &place_id, &json!({ "description": "Renovated" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let place = store.get_place(&place_id).await.unwrap().unwrap();
    assert_eq!(place.description.as_deref(), Some("Renovated"));
}

#[actix_web::test]
async fn update_with_unknown_owner_id_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        put_place(&token, &place_id, &json!({ "owner_id": "nobody" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Owner with id nobody not found" }));
}

#[actix_web::test]
async fn update_missing_place_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        put_place(&token_for(&owner), "ghost", &json!({ "title": "X" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place not found" }));
}

#[actix_web::test]
async fn amenity_link_flow_with_duplicate_conflict() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let wifi = store.add_amenity(NewAmenity {
        name: "WiFi".to_string(),
    });

    // Empty before any link
    let req = TestRequest::get()
        .uri(&format!("/places/{}/amenities", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));

    let resp = test::call_service(
        &app,
        post_amenity(&token, &place_id, &json!({ "amenity_id": wifi.id })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Amenity successfully added to place" }));

    // Linking twice is a conflict, not an idempotent no-op
    let resp = test::call_service(
        &app,
        post_amenity(&token, &place_id, &json!({ "amenity_id": wifi.id })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "Amenity is already associated with this place" })
    );

    // And the list is unchanged
    let req = TestRequest::get()
        .uri(&format!("/places/{}/amenities", place_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "WiFi");
}

#[actix_web::test]
async fn amenity_link_requires_amenity_id() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    for payload in [json!({}), json!({ "amenity_id": "   " })] {
        let resp = test::call_service(
            &app,
            post_amenity(&token, &place_id, &payload).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Amenity ID is required" }));
    }
}

#[actix_web::test]
async fn amenity_link_with_unknown_amenity_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);
    let token = token_for(&owner);

    let resp = test::call_service(&app, post_place(&token, &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        post_amenity(&token, &place_id, &json!({ "amenity_id": "ghost" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Amenity not found" }));
}

#[actix_web::test]
async fn amenity_link_by_stranger_is_forbidden() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let other = stranger(&store);
    let app = init_app!(store);

    let resp = test::call_service(&app, post_place(&token_for(&owner), &cabin_payload()).to_request()).await;
    let created: Value = test::read_body_json(resp).await;
    let place_id = created["id"].as_str().unwrap().to_string();

    let wifi = store.add_amenity(NewAmenity {
        name: "WiFi".to_string(),
    });

    let resp = test::call_service(
        &app,
        post_amenity(&token_for(&other), &place_id, &json!({ "amenity_id": wifi.id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let linked = store.amenities_for_place(&place_id).await.unwrap();
    assert!(linked.is_empty());
}

#[actix_web::test]
async fn amenity_link_for_missing_place_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let owner = host(&store);
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        post_amenity(&token_for(&owner), "ghost", &json!({ "amenity_id": "wifi" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Place not found" }));
}
