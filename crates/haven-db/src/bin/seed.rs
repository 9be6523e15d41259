//! # Seed Data Generator
//!
//! Populates the database with development data: a handful of hosts and
//! guests, listings spread across cities, reviews, and reservations.
//!
//! ## Usage
//! ```bash
//! # Generate 200 listings (default)
//! cargo run -p haven-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p haven-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p haven-db --bin seed -- --db ./data/haven.db
//! ```
//!
//! ## Generated Data
//! - 8 hosts and 12 guests with lowercase emails
//! - Listings across 10 cities with nightly rates from $45 to $420
//! - 0-4 reviews per listing (ratings skewed positive, like real data)
//! - A recent reservation history for every guest

use chrono::{Days, NaiveDate, Utc};
use std::env;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use haven_core::{
    Money, NewProperty, NewReservation, NewReview, NewUser, PropertySearch, DEFAULT_PAGE_SIZE,
};
use haven_db::{Database, DbConfig};

/// City spread for generated listings.
const CITIES: &[(&str, &str)] = &[
    ("Vancouver", "BC"),
    ("North Vancouver", "BC"),
    ("Victoria", "BC"),
    ("Kelowna", "BC"),
    ("Calgary", "AB"),
    ("Edmonton", "AB"),
    ("Toronto", "ON"),
    ("Ottawa", "ON"),
    ("Montreal", "QC"),
    ("Halifax", "NS"),
];

/// Listing title fragments, combined per index.
const STYLES: &[&str] = &[
    "Cozy", "Sunny", "Modern", "Rustic", "Quiet", "Charming", "Spacious", "Bright",
];
const KINDS: &[&str] = &[
    "Loft", "Cabin", "Studio", "Bungalow", "Townhouse", "Suite", "Cottage", "Flat",
];

const HOSTS: &[&str] = &[
    "Maya Chen", "Luis Ortega", "Priya Nair", "Tomas Eriksen", "Amara Diallo",
    "Jonas Weber", "Sofia Rossi", "Noah Tremblay",
];

const GUESTS: &[&str] = &[
    "Ava Patel", "Ben Carter", "Chloe Kim", "Daniel Fofana", "Emma Larsen",
    "Felix Braun", "Grace Liu", "Hugo Martin", "Isla Murray", "Jack Nguyen",
    "Lena Fischer", "Marco Silva",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    let (count, db_path) = parse_args();

    println!("Seeding {} listings into {}", count, db_path);

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    let start = std::time::Instant::now();

    // Hosts and guests
    let mut host_ids = Vec::new();
    for (i, name) in HOSTS.iter().enumerate() {
        let user = db
            .users()
            .insert(&NewUser {
                name: name.to_string(),
                email: format!("host{}@seed.haven.test", i),
                password: "seed-password".to_string(),
            })
            .await?;
        host_ids.push(user.id);
    }

    let mut guest_ids = Vec::new();
    for (i, name) in GUESTS.iter().enumerate() {
        let user = db
            .users()
            .insert(&NewUser {
                name: name.to_string(),
                email: format!("guest{}@seed.haven.test", i),
                password: "seed-password".to_string(),
            })
            .await?;
        guest_ids.push(user.id);
    }

    println!("  {} hosts, {} guests", host_ids.len(), guest_ids.len());

    // Listings
    let mut property_ids = Vec::new();
    for i in 0..count {
        let property = db.properties().insert(&generate_property(&host_ids, i)).await?;
        property_ids.push(property.id);

        if (i + 1) % 50 == 0 {
            println!("  {} listings...", i + 1);
        }
    }

    // Reviews: 0-4 per listing, ratings skewed positive
    let mut reviews = 0usize;
    for (i, property_id) in property_ids.iter().enumerate() {
        for r in 0..(i % 5) {
            let rating = 3 + ((i + r) % 3) as i64; // 3..=5
            db.reviews()
                .insert(&NewReview {
                    guest_id: guest_ids[(i + r) % guest_ids.len()].clone(),
                    property_id: property_id.clone(),
                    reservation_id: None,
                    rating,
                    message: None,
                })
                .await?;
            reviews += 1;
        }
    }

    // Reservations: a short history per guest
    let today = Utc::now().date_naive();
    let mut reservations = 0usize;
    for (g, guest_id) in guest_ids.iter().enumerate() {
        for s in 0..3 {
            let property_id = &property_ids[(g * 7 + s * 3) % property_ids.len()];
            let start_date = back_dated(today, (g * 31 + s * 11) as u64 + 7);
            db.reservations()
                .insert(&NewReservation {
                    guest_id: guest_id.clone(),
                    property_id: property_id.clone(),
                    start_date,
                    end_date: start_date + Days::new(2 + (s as u64 % 4)),
                })
                .await?;
            reservations += 1;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} listings, {} reviews, {} reservations in {:?}",
        property_ids.len(),
        reviews,
        reservations,
        elapsed
    );

    // Verify search over the seeded data
    println!();
    println!("Verifying search...");
    let search = PropertySearch {
        city: Some("Vancouver".to_string()),
        minimum_rating: Some(4.0),
        ..Default::default()
    };
    let results = db.properties().search(&search, DEFAULT_PAGE_SIZE).await?;
    println!("  Vancouver, rated 4+: {} results", results.len());
    if let Some(first) = results.first() {
        println!(
            "  Cheapest: \"{}\" at {} per night",
            first.property.title,
            first.property.cost_per_night()
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Parses `--count N` and `--db PATH` from the command line.
fn parse_args() -> (usize, String) {
    let args: Vec<String> = env::args().collect();
    let mut count = 200usize;
    let mut db_path = env::var("HAVEN_DATABASE_PATH").unwrap_or_else(|_| "./haven.db".to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse().unwrap_or(count);
                    i += 1;
                }
            }
            "--db" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = value.clone();
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    (count, db_path)
}

/// Generates a single listing with data derived from the loop index, so
/// reruns against a fresh database produce the same spread.
fn generate_property(host_ids: &[String], seed: usize) -> NewProperty {
    let (city, province) = CITIES[seed % CITIES.len()];
    let style = STYLES[seed % STYLES.len()];
    let kind = KINDS[(seed / STYLES.len()) % KINDS.len()];

    // Nightly rate: $45 - $420 in whole units
    let rate = Money::from_major(45 + ((seed * 23) % 376) as i64);

    let bedrooms = 1 + (seed % 4) as i64;

    NewProperty {
        owner_id: host_ids[seed % host_ids.len()].clone(),
        title: format!("{} {} in {}", style, kind, city),
        description: format!(
            "{} {} with {} bedrooms, a short walk from downtown {}.",
            style, kind, bedrooms, city
        ),
        thumbnail_photo_url: format!("https://photos.haven.test/{}/thumb.jpg", Uuid::new_v4()),
        cover_photo_url: format!("https://photos.haven.test/{}/cover.jpg", Uuid::new_v4()),
        cost_per_night_cents: rate.cents(),
        parking_spaces: (seed % 3) as i64,
        number_of_bathrooms: 1 + (seed % 2) as i64,
        number_of_bedrooms: bedrooms,
        street: format!("{} {} St", 100 + (seed * 13) % 899, style),
        city: city.to_string(),
        province: province.to_string(),
        post_code: format!("V{}K {}A{}", seed % 10, (seed / 10) % 10, seed % 10),
        country: "Canada".to_string(),
    }
}

/// A date `days` before `today`, saturating at `today` if arithmetic
/// ever underflows the calendar.
fn back_dated(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}
