//! # Property Repository
//!
//! Database operations for rental listings.
//!
//! ## Search Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    How Property Search Works                        │
//! │                                                                     │
//! │  PropertySearch { city: Some("couver"), minimum_rating: Some(4.0) } │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  search_query() assembles one statement from the set filters:       │
//! │                                                                     │
//! │  SELECT properties.*, avg(property_reviews.rating) ...              │
//! │    WHERE properties.active = 1                                      │
//! │      AND properties.city LIKE ?        ← bound "%couver%"           │
//! │    GROUP BY properties.id                                           │
//! │    HAVING avg(property_reviews.rating) >= ?  ← bound 4.0            │
//! │    ORDER BY properties.cost_per_night_cents ASC                     │
//! │    LIMIT ?                                                          │
//! │                                                                     │
//! │  Unset filters contribute nothing. Every caller value is a bound    │
//! │  parameter; nothing is spliced into the SQL text.                   │
//! │                                                                     │
//! │  owner_id is special: it short-circuits to the owner's-own-         │
//! │  listings path and ignores every other filter.                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use haven_core::validation::validate_new_property;
use haven_core::{Money, NewProperty, Property, PropertyListing, PropertySearch};

/// Shared SELECT head for both search paths: the property row plus the
/// aggregated review average. LEFT JOIN so unreviewed listings still
/// appear (their average_rating is NULL).
const SEARCH_BASE: &str = "SELECT properties.*, avg(property_reviews.rating) AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON property_reviews.property_id = properties.id";

/// Assembles the search statement for the given filter options.
///
/// Kept as a standalone function so filter combinations can be tested
/// without a live database.
///
/// ## Filter Semantics
/// - `owner_id` set: return that owner's listings (active or not) and
///   ignore all other filters
/// - `city`: substring match, bound as a `%city%` pattern
/// - `minimum/maximum_price_per_night`: whole currency units, compared
///   against the stored cents value (×100 happens here, nowhere else)
/// - `minimum_rating`: HAVING clause, applied after aggregation
///
/// Results are always ordered by nightly cost ascending and limited.
fn search_query(search: &PropertySearch, limit: i64) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::new(SEARCH_BASE);

    if let Some(owner_id) = &search.owner_id {
        // Owners manage their own listings, including delisted ones.
        query.push(" WHERE properties.owner_id = ");
        query.push_bind(owner_id.clone());
    } else {
        query.push(" WHERE properties.active = 1");

        if let Some(city) = &search.city {
            query.push(" AND properties.city LIKE ");
            query.push_bind(format!("%{}%", city.trim()));
        }

        if let Some(minimum) = search.minimum_price_per_night {
            query.push(" AND properties.cost_per_night_cents >= ");
            query.push_bind(Money::from_major(minimum).cents());
        }

        if let Some(maximum) = search.maximum_price_per_night {
            query.push(" AND properties.cost_per_night_cents <= ");
            query.push_bind(Money::from_major(maximum).cents());
        }
    }

    query.push(" GROUP BY properties.id");

    if search.owner_id.is_none() {
        if let Some(rating) = search.minimum_rating {
            // NULL averages (no reviews) fail the comparison, so a
            // rating floor also excludes unreviewed listings.
            query.push(" HAVING avg(property_reviews.rating) >= ");
            query.push_bind(rating);
        }
    }

    query.push(" ORDER BY properties.cost_per_night_cents ASC LIMIT ");
    query.push_bind(limit.max(0));

    query
}

/// Repository for property database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PropertyRepository::new(pool);
///
/// // Filtered search
/// let listings = repo.search(&search, 10).await?;
///
/// // Create a listing
/// let property = repo.insert(&new_property).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Searches listings with the given filter options.
    ///
    /// ## Arguments
    /// * `search` - Filter options; unset fields are omitted from the SQL
    /// * `limit` - Maximum results to return
    ///
    /// ## Returns
    /// Listings with their average review rating, ordered by nightly
    /// cost ascending.
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: i64,
    ) -> DbResult<Vec<PropertyListing>> {
        debug!(?search, limit, "Searching properties");

        let mut query = search_query(search, limit);
        let listings = query
            .build_query_as::<PropertyListing>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = listings.len(), "Search returned listings");
        Ok(listings)
    }

    /// Gets a property by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Property))` - Property found
    /// * `Ok(None)` - Property not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            SELECT
                id, owner_id, title, description,
                thumbnail_photo_url, cover_photo_url,
                cost_per_night_cents, parking_spaces,
                number_of_bathrooms, number_of_bedrooms,
                street, city, province, post_code, country,
                active, created_at
            FROM properties
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Creates a new listing and returns the inserted row.
    ///
    /// The payload is validated first: any empty required text field
    /// rejects the whole insert with a typed error, and nothing reaches
    /// the database.
    ///
    /// ## Returns
    /// * `Ok(Property)` - The inserted row
    /// * `Err(DbError::Domain)` - Validation rejected the payload
    /// * `Err(DbError::ForeignKeyViolation)` - owner_id doesn't exist
    pub async fn insert(&self, new_property: &NewProperty) -> DbResult<Property> {
        validate_new_property(new_property).map_err(haven_core::CoreError::from)?;

        let property = Property {
            id: Uuid::new_v4().to_string(),
            owner_id: new_property.owner_id.clone(),
            title: new_property.title.clone(),
            description: new_property.description.clone(),
            thumbnail_photo_url: new_property.thumbnail_photo_url.clone(),
            cover_photo_url: new_property.cover_photo_url.clone(),
            cost_per_night_cents: new_property.cost_per_night_cents,
            parking_spaces: new_property.parking_spaces,
            number_of_bathrooms: new_property.number_of_bathrooms,
            number_of_bedrooms: new_property.number_of_bedrooms,
            street: new_property.street.clone(),
            city: new_property.city.clone(),
            province: new_property.province.clone(),
            post_code: new_property.post_code.clone(),
            country: new_property.country.clone(),
            active: true,
            created_at: Utc::now(),
        };

        debug!(id = %property.id, title = %property.title, "Inserting property");

        sqlx::query(
            r#"
            INSERT INTO properties (
                id, owner_id, title, description,
                thumbnail_photo_url, cover_photo_url,
                cost_per_night_cents, parking_spaces,
                number_of_bathrooms, number_of_bedrooms,
                street, city, province, post_code, country,
                active, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8,
                ?9, ?10,
                ?11, ?12, ?13, ?14, ?15,
                ?16, ?17
            )
            "#,
        )
        .bind(&property.id)
        .bind(&property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night_cents)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.active)
        .bind(property.created_at)
        .execute(&self.pool)
        .await?;

        Ok(property)
    }

    /// Sets the visibility flag on a listing.
    ///
    /// ## Why Not Delete?
    /// Reservations and reviews reference the property; delisting keeps
    /// the history intact while hiding the listing from public search.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active, "Updating property visibility");

        let result = sqlx::query("UPDATE properties SET active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Property", id));
        }

        Ok(())
    }

    /// Counts active listings (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Query assembly (no database needed)
    // -------------------------------------------------------------------------

    #[test]
    fn test_unfiltered_query_has_no_filter_clauses() {
        let query = search_query(&PropertySearch::default(), 10);
        let sql = query.sql();

        assert!(sql.contains("WHERE properties.active = 1"));
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains("HAVING"));
        assert!(!sql.contains("cost_per_night_cents >="));
        assert!(sql.contains("GROUP BY properties.id"));
        assert!(sql.contains("ORDER BY properties.cost_per_night_cents ASC"));
    }

    #[test]
    fn test_city_filter_adds_like_clause() {
        let search = PropertySearch {
            city: Some("Vancouver".to_string()),
            ..Default::default()
        };
        let query = search_query(&search, 10);
        assert!(query.sql().contains("properties.city LIKE "));
    }

    #[test]
    fn test_price_band_adds_both_comparisons() {
        let search = PropertySearch {
            minimum_price_per_night: Some(100),
            maximum_price_per_night: Some(300),
            ..Default::default()
        };
        let query = search_query(&search, 10);
        let sql = query.sql();
        assert!(sql.contains("cost_per_night_cents >= "));
        assert!(sql.contains("cost_per_night_cents <= "));
    }

    #[test]
    fn test_rating_filter_lands_after_group_by() {
        let search = PropertySearch {
            minimum_rating: Some(4.0),
            ..Default::default()
        };
        let query = search_query(&search, 10);
        let sql = query.sql();

        let group = sql.find("GROUP BY").unwrap();
        let having = sql.find("HAVING").unwrap();
        assert!(having > group);
    }

    #[test]
    fn test_owner_path_ignores_other_filters() {
        let search = PropertySearch {
            owner_id: Some("owner-1".to_string()),
            city: Some("Vancouver".to_string()),
            minimum_rating: Some(4.0),
            minimum_price_per_night: Some(100),
            ..Default::default()
        };
        let query = search_query(&search, 10);
        let sql = query.sql();

        assert!(sql.contains("properties.owner_id = "));
        // The owner path must not carry the public-search filters.
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains("HAVING"));
        assert!(!sql.contains("active = 1"));
    }

    // -------------------------------------------------------------------------
    // Against an in-memory database
    // -------------------------------------------------------------------------

    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use haven_core::{NewReview, NewUser, DEFAULT_PAGE_SIZE};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn make_user(db: &Database) -> String {
        let owner = db
            .users()
            .insert(&NewUser {
                name: "Olive Owner".to_string(),
                email: format!("owner-{}@example.com", Uuid::new_v4()),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        owner.id
    }

    fn listing(owner_id: &str, title: &str, city: &str, nightly_cents: i64) -> NewProperty {
        NewProperty {
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            description: "A lovely place to stay".to_string(),
            thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
            cover_photo_url: "https://example.com/cover.jpg".to_string(),
            cost_per_night_cents: nightly_cents,
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 2,
            street: "123 Main St".to_string(),
            city: city.to_string(),
            province: "BC".to_string(),
            post_code: "V5K 0A1".to_string(),
            country: "Canada".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_returns_observable_row() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        let inserted = db
            .properties()
            .insert(&listing(&owner, "Harbour Loft", "Vancouver", 14_000))
            .await
            .unwrap();

        let fetched = db
            .properties()
            .get_by_id(&inserted.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "Harbour Loft");
        assert_eq!(fetched.cost_per_night_cents, 14_000);
        assert!(fetched.active);
    }

    #[tokio::test]
    async fn test_empty_field_inserts_nothing() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        let mut bad = listing(&owner, "Harbour Loft", "Vancouver", 14_000);
        bad.description = String::new();

        let err = db.properties().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
        assert_eq!(db.properties().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_minimum_price_floor_is_times_100() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        for (title, cents) in [
            ("Cheap", 9_900),    // $99
            ("Boundary", 15_000), // exactly $150
            ("Mid", 20_000),     // $200
            ("High", 40_000),    // $400
        ] {
            db.properties()
                .insert(&listing(&owner, title, "Vancouver", cents))
                .await
                .unwrap();
        }

        let search = PropertySearch {
            minimum_price_per_night: Some(150),
            ..Default::default()
        };
        let results = db
            .properties()
            .search(&search, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        for row in &results {
            assert!(row.property.cost_per_night_cents >= 150 * 100);
        }
    }

    #[tokio::test]
    async fn test_results_ordered_by_cost_ascending() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        for cents in [30_000, 8_000, 19_500, 12_000] {
            db.properties()
                .insert(&listing(&owner, "Stay", "Toronto", cents))
                .await
                .unwrap();
        }

        let results = db
            .properties()
            .search(&PropertySearch::default(), DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        let costs: Vec<i64> = results
            .iter()
            .map(|r| r.property.cost_per_night_cents)
            .collect();
        let mut sorted = costs.clone();
        sorted.sort();
        assert_eq!(costs, sorted);
    }

    #[tokio::test]
    async fn test_city_substring_match() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        db.properties()
            .insert(&listing(&owner, "A", "North Vancouver", 10_000))
            .await
            .unwrap();
        db.properties()
            .insert(&listing(&owner, "B", "Toronto", 11_000))
            .await
            .unwrap();

        let search = PropertySearch {
            city: Some("couver".to_string()),
            ..Default::default()
        };
        let results = db
            .properties()
            .search(&search, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].property.city, "North Vancouver");
    }

    #[tokio::test]
    async fn test_minimum_rating_filters_after_aggregation() {
        let db = test_db().await;
        let owner = make_user(&db).await;
        let guest = make_user(&db).await;

        let praised = db
            .properties()
            .insert(&listing(&owner, "Praised", "Calgary", 10_000))
            .await
            .unwrap();
        let panned = db
            .properties()
            .insert(&listing(&owner, "Panned", "Calgary", 11_000))
            .await
            .unwrap();
        // Unreviewed listing: no rating rows at all.
        db.properties()
            .insert(&listing(&owner, "Unreviewed", "Calgary", 12_000))
            .await
            .unwrap();

        for rating in [5, 4] {
            db.reviews()
                .insert(&NewReview {
                    guest_id: guest.clone(),
                    property_id: praised.id.clone(),
                    reservation_id: None,
                    rating,
                    message: None,
                })
                .await
                .unwrap();
        }
        db.reviews()
            .insert(&NewReview {
                guest_id: guest.clone(),
                property_id: panned.id.clone(),
                reservation_id: None,
                rating: 2,
                message: Some("Noisy".to_string()),
            })
            .await
            .unwrap();

        let search = PropertySearch {
            minimum_rating: Some(4.0),
            ..Default::default()
        };
        let results = db
            .properties()
            .search(&search, DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].property.id, praised.id);
        assert_eq!(results[0].average_rating, Some(4.5));
    }

    #[tokio::test]
    async fn test_unreviewed_listing_appears_without_rating_filter() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        db.properties()
            .insert(&listing(&owner, "Fresh", "Halifax", 10_000))
            .await
            .unwrap();

        let results = db
            .properties()
            .search(&PropertySearch::default(), DEFAULT_PAGE_SIZE)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].average_rating.is_none());
        assert!(!results[0].has_reviews());
    }

    #[tokio::test]
    async fn test_owner_search_includes_delisted_properties() {
        let db = test_db().await;
        let owner = make_user(&db).await;
        let other = make_user(&db).await;

        let mine = db
            .properties()
            .insert(&listing(&owner, "Mine", "Victoria", 10_000))
            .await
            .unwrap();
        db.properties()
            .insert(&listing(&other, "Theirs", "Victoria", 11_000))
            .await
            .unwrap();

        db.properties().set_active(&mine.id, false).await.unwrap();

        // Public search no longer sees the delisted property.
        let public = db
            .properties()
            .search(&PropertySearch::default(), DEFAULT_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].property.title, "Theirs");

        // The owner still sees it.
        let own = db
            .properties()
            .search(
                &PropertySearch {
                    owner_id: Some(owner.clone()),
                    ..Default::default()
                },
                DEFAULT_PAGE_SIZE,
            )
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].property.id, mine.id);
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let db = test_db().await;
        let owner = make_user(&db).await;

        for i in 0..5 {
            db.properties()
                .insert(&listing(&owner, "Stay", "Montreal", 10_000 + i * 100))
                .await
                .unwrap();
        }

        let results = db
            .properties()
            .search(&PropertySearch::default(), 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }
}
