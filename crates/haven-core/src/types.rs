//! # Domain Types
//!
//! Core domain types used throughout Haven.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌───────────────────┐    │
//! │  │     User      │   │    Property    │   │    Reservation    │    │
//! │  │  ───────────  │   │  ────────────  │   │  ───────────────  │    │
//! │  │  id (UUID)    │◄──│  owner_id (FK) │◄──│  property_id (FK) │    │
//! │  │  email (lc)   │   │  cost (cents)  │   │  guest_id (FK)    │    │
//! │  │  password     │   │  address       │   │  start/end date   │    │
//! │  └───────────────┘   └────────────────┘   └───────────────────┘    │
//! │                              ▲                                     │
//! │                      ┌───────┴────────┐                            │
//! │                      │ PropertyReview │  avg(rating) becomes       │
//! │                      │  rating 1..=5  │  PropertyListing.          │
//! │                      └────────────────┘  average_rating            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row Types vs Insert Payloads
//! Every persisted entity has two shapes:
//! - The row type (`User`, `Property`, ...) mirrors a database row and
//!   derives `sqlx::FromRow` behind the `sqlx` feature.
//! - The `New*` payload carries only caller-supplied fields; ids and
//!   timestamps are generated by the repository at insert time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A registered user. A user can own properties, make reservations as a
/// guest, and leave reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email, stored lowercase. Lookups lowercase their input, so
    /// matching is case-insensitive no matter what the caller typed.
    pub email: String,

    /// Opaque credential string. This layer never interprets it;
    /// hashing is the job of the authentication layer upstream.
    pub password: String,

    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Property
// =============================================================================

/// A rental listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Property {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The user who owns this listing.
    pub owner_id: String,

    /// Listing headline.
    pub title: String,

    /// Longer free-form description.
    pub description: String,

    /// Small photo shown in search results.
    pub thumbnail_photo_url: String,

    /// Large photo shown on the listing page.
    pub cover_photo_url: String,

    /// Nightly rate in cents (never a float).
    pub cost_per_night_cents: i64,

    /// Number of parking spaces.
    pub parking_spaces: i64,

    /// Number of bathrooms.
    pub number_of_bathrooms: i64,

    /// Number of bedrooms.
    pub number_of_bedrooms: i64,

    /// Street address.
    pub street: String,

    /// City. Matched by substring in search.
    pub city: String,

    /// Province or state.
    pub province: String,

    /// Postal code.
    pub post_code: String,

    /// Country.
    pub country: String,

    /// Whether the listing is visible in public search.
    pub active: bool,

    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Returns the nightly rate as a Money value.
    #[inline]
    pub fn cost_per_night(&self) -> Money {
        Money::from_cents(self.cost_per_night_cents)
    }
}

/// Payload for creating a new listing.
///
/// All text fields are required; the repository rejects the payload with
/// a `ValidationError` if any of them is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly rate in cents.
    pub cost_per_night_cents: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
}

// =============================================================================
// Property Listing (search result row)
// =============================================================================

/// A property as returned by search: the row itself plus the aggregated
/// review average.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyListing {
    /// The underlying property row.
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub property: Property,

    /// Average review rating, `None` when the property has no reviews yet.
    pub average_rating: Option<f64>,
}

impl PropertyListing {
    /// Whether any guest has reviewed this property.
    #[inline]
    pub fn has_reviews(&self) -> bool {
        self.average_rating.is_some()
    }
}

// =============================================================================
// Property Search Options
// =============================================================================

/// Filter options for property search.
///
/// Unset fields are simply omitted from the generated SQL. `owner_id`
/// short-circuits every other filter: it switches search to the
/// owner's-own-listings path.
///
/// Prices are whole currency units as typed by the caller; the query
/// builder converts them to cents (×100) against the stored rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySearch {
    /// Restrict to listings owned by this user (ignores all other filters).
    pub owner_id: Option<String>,

    /// Substring match on the city name.
    pub city: Option<String>,

    /// Minimum nightly price in whole currency units.
    pub minimum_price_per_night: Option<i64>,

    /// Maximum nightly price in whole currency units.
    pub maximum_price_per_night: Option<i64>,

    /// Minimum average review rating (applied after aggregation).
    pub minimum_rating: Option<f64>,
}

impl PropertySearch {
    /// True when no filter is set (plain "browse everything" search).
    pub fn is_unfiltered(&self) -> bool {
        self.owner_id.is_none()
            && self.city.is_none()
            && self.minimum_price_per_night.is_none()
            && self.maximum_price_per_night.is_none()
            && self.minimum_rating.is_none()
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A booking linking a guest to a property over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reservation {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// First night of the stay.
    pub start_date: NaiveDate,

    /// Check-out date.
    pub end_date: NaiveDate,

    /// The property being booked.
    pub property_id: String,

    /// The guest making the booking.
    pub guest_id: String,

    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Number of nights in the stay.
    #[inline]
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Payload for booking a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub guest_id: String,
    pub property_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// =============================================================================
// Guest Reservation (join row)
// =============================================================================

/// A reservation joined with the property it books, as shown on a
/// guest's "my reservations" page. Newest stays come first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GuestReservation {
    /// Reservation id.
    pub id: String,

    /// The guest who booked.
    pub guest_id: String,

    /// The booked property.
    pub property_id: String,

    /// First night of the stay.
    pub start_date: NaiveDate,

    /// Check-out date.
    pub end_date: NaiveDate,

    /// Property headline.
    pub title: String,

    /// Property city.
    pub city: String,

    /// Thumbnail for the reservation card.
    pub thumbnail_photo_url: String,

    /// Nightly rate in cents at the time of the query.
    pub cost_per_night_cents: i64,

    /// Number of bedrooms.
    pub number_of_bedrooms: i64,

    /// Number of bathrooms.
    pub number_of_bathrooms: i64,

    /// Number of parking spaces.
    pub parking_spaces: i64,
}

impl GuestReservation {
    /// Total cost of the stay (nightly rate × nights).
    pub fn total_cost(&self) -> Money {
        let nights = (self.end_date - self.start_date).num_days();
        Money::from_cents(self.cost_per_night_cents) * nights
    }
}

// =============================================================================
// Property Review
// =============================================================================

/// A guest's rating of a property, aggregated into `average_rating` for
/// listing display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyReview {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The guest leaving the review.
    pub guest_id: String,

    /// The reviewed property.
    pub property_id: String,

    /// The stay this review is about, when known.
    pub reservation_id: Option<String>,

    /// Rating, 1 to 5.
    pub rating: i64,

    /// Optional free-form comment.
    pub message: Option<String>,

    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for leaving a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub guest_id: String,
    pub property_id: String,
    pub reservation_id: Option<String>,
    pub rating: i64,
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_search_default_is_unfiltered() {
        let search = PropertySearch::default();
        assert!(search.is_unfiltered());
    }

    #[test]
    fn test_property_search_with_city_is_filtered() {
        let search = PropertySearch {
            city: Some("Vancouver".to_string()),
            ..Default::default()
        };
        assert!(!search.is_unfiltered());
    }

    #[test]
    fn test_reservation_nights() {
        let reservation = Reservation {
            id: "r1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            property_id: "p1".to_string(),
            guest_id: "u1".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(reservation.nights(), 4);
    }

    #[test]
    fn test_guest_reservation_total_cost() {
        let row = GuestReservation {
            id: "r1".to_string(),
            guest_id: "u1".to_string(),
            property_id: "p1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            title: "Loft".to_string(),
            city: "Vancouver".to_string(),
            thumbnail_photo_url: "https://example.com/t.jpg".to_string(),
            cost_per_night_cents: 12_000,
            number_of_bedrooms: 1,
            number_of_bathrooms: 1,
            parking_spaces: 0,
        };
        // 3 nights at $120.00
        assert_eq!(row.total_cost(), Money::from_cents(36_000));
    }

    #[test]
    fn test_search_deserializes_with_missing_fields() {
        let search: PropertySearch =
            serde_json::from_str(r#"{"city": "Toronto"}"#).unwrap();
        assert_eq!(search.city.as_deref(), Some("Toronto"));
        assert!(search.minimum_rating.is_none());
    }
}
