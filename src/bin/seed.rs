// src/bin/seed.rs
// Seeds a running hbnb-places instance with demo listings over HTTP.
// Mints an admin bearer token locally with the shared JWT secret; the
// target user must already exist in the store (the memory backend ships
// with the fixed "demo-host" user).

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde_json::json;
use std::env;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

struct DemoPlace {
    title: &'static str,
    description: &'static str,
    price: f64,
    latitude: f64,
    longitude: f64,
}

const DEMO_PLACES: &[DemoPlace] = &[
    DemoPlace {
        title: "Cozy Cabin in the Woods",
        description: "Quiet cabin with a fireplace and forest views",
        price: 95.0,
        latitude: 45.83,
        longitude: 6.86,
    },
    DemoPlace {
        title: "Beachfront Studio",
        description: "Steps from the sand, sleeps two",
        price: 140.0,
        latitude: 43.69,
        longitude: 7.27,
    },
    DemoPlace {
        title: "Downtown Loft",
        description: "Bright loft above the market square",
        price: 120.0,
        latitude: 48.85,
        longitude: 2.35,
    },
    DemoPlace {
        title: "Mountain View Chalet",
        description: "Panoramic terrace, ski storage, sauna",
        price: 210.0,
        latitude: 46.0,
        longitude: 7.5,
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let base_url =
        env::var("SEED_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8002".to_string());
    let secret = env::var("JWT_SECRET").unwrap_or_else(|_| "hbnb-dev-secret".to_string());
    let owner_id = env::var("SEED_USER_ID").unwrap_or_else(|_| "demo-host".to_string());

    let token = hbnb_places::auth::mint_token(&secret, &owner_id, true)
        .context("failed to mint seed token")?;
    let client = Client::new();

    println!("{}Seeding {} as user {}{}", CYAN, base_url, owner_id, RESET);

    let mut created = 0usize;
    let mut failed = 0usize;

    for place in DEMO_PLACES {
        let resp = client
            .post(format!("{}/places", base_url))
            .bearer_auth(&token)
            .json(&json!({
                "title": place.title,
                "description": place.description,
                "price": place.price,
                "latitude": place.latitude,
                "longitude": place.longitude,
            }))
            .send()
            .await
            .with_context(|| format!("request failed for {}", place.title))?;

        let status = resp.status();
        if status.is_success() {
            println!("  {}created{} {}", GREEN, RESET, place.title);
            created += 1;
        } else {
            let body = resp.text().await.unwrap_or_default();
            println!("  {}{}:{} {} -> {}", RED, status, RESET, place.title, body);
            failed += 1;
        }
    }

    println!(
        "{}Done:{} {} created, {} failed",
        CYAN, RESET, created, failed
    );

    if failed > 0 {
        bail!("{} places could not be created", failed);
    }
    Ok(())
}
