//! # Review Repository
//!
//! Database operations for property reviews. Ratings written here feed
//! the `average_rating` column of property search results.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use haven_core::validation::validate_rating;
use haven_core::{NewReview, PropertyReview};

/// Repository for review database operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Records a review and returns the inserted row.
    ///
    /// ## Returns
    /// * `Ok(PropertyReview)` - The inserted row
    /// * `Err(DbError::Domain)` - Rating outside 1..=5
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest or property
    pub async fn insert(&self, new_review: &NewReview) -> DbResult<PropertyReview> {
        validate_rating(new_review.rating).map_err(haven_core::CoreError::from)?;

        let review = PropertyReview {
            id: Uuid::new_v4().to_string(),
            guest_id: new_review.guest_id.clone(),
            property_id: new_review.property_id.clone(),
            reservation_id: new_review.reservation_id.clone(),
            rating: new_review.rating,
            message: new_review.message.clone(),
            created_at: Utc::now(),
        };

        debug!(
            id = %review.id,
            property_id = %review.property_id,
            rating = review.rating,
            "Inserting review"
        );

        sqlx::query(
            r#"
            INSERT INTO property_reviews (
                id, guest_id, property_id, reservation_id,
                rating, message, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&review.id)
        .bind(&review.guest_id)
        .bind(&review.property_id)
        .bind(&review.reservation_id)
        .bind(review.rating)
        .bind(&review.message)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        Ok(review)
    }

    /// Gets all reviews for a property, newest first.
    pub async fn for_property(&self, property_id: &str) -> DbResult<Vec<PropertyReview>> {
        let reviews = sqlx::query_as::<_, PropertyReview>(
            r#"
            SELECT id, guest_id, property_id, reservation_id,
                   rating, message, created_at
            FROM property_reviews
            WHERE property_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Gets the average rating for a property.
    ///
    /// ## Returns
    /// * `Ok(Some(avg))` - Average over all the property's reviews
    /// * `Ok(None)` - The property has no reviews yet
    pub async fn average_for_property(&self, property_id: &str) -> DbResult<Option<f64>> {
        let average: Option<f64> = sqlx::query_scalar(
            "SELECT avg(rating) FROM property_reviews WHERE property_id = ?1",
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use haven_core::{NewProperty, NewUser};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn make_user(db: &Database, name: &str) -> String {
        db.users()
            .insert(&NewUser {
                name: name.to_string(),
                email: format!("{}-{}@example.com", name, Uuid::new_v4()),
                password: "pw".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn make_property(db: &Database, owner_id: &str) -> String {
        db.properties()
            .insert(&NewProperty {
                owner_id: owner_id.to_string(),
                title: "Garden Suite".to_string(),
                description: "Ground floor suite with garden access".to_string(),
                thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
                cover_photo_url: "https://example.com/cover.jpg".to_string(),
                cost_per_night_cents: 9_500,
                parking_spaces: 0,
                number_of_bathrooms: 1,
                number_of_bedrooms: 1,
                street: "44 Rose Ln".to_string(),
                city: "Victoria".to_string(),
                province: "BC".to_string(),
                post_code: "V8V 1V1".to_string(),
                country: "Canada".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn review(guest: &str, property: &str, rating: i64) -> NewReview {
        NewReview {
            guest_id: guest.to_string(),
            property_id: property.to_string(),
            reservation_id: None,
            rating,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_average_over_multiple_reviews() {
        let db = test_db().await;
        let owner = make_user(&db, "owner").await;
        let guest = make_user(&db, "guest").await;
        let property = make_property(&db, &owner).await;

        for rating in [5, 4, 3] {
            db.reviews()
                .insert(&review(&guest, &property, rating))
                .await
                .unwrap();
        }

        let average = db
            .reviews()
            .average_for_property(&property)
            .await
            .unwrap()
            .unwrap();
        assert!((average - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_no_reviews_means_no_average() {
        let db = test_db().await;
        let owner = make_user(&db, "owner").await;
        let property = make_property(&db, &owner).await;

        let average = db.reviews().average_for_property(&property).await.unwrap();
        assert!(average.is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let db = test_db().await;
        let owner = make_user(&db, "owner").await;
        let guest = make_user(&db, "guest").await;
        let property = make_property(&db, &owner).await;

        for bad in [0, 6, -1] {
            let err = db
                .reviews()
                .insert(&review(&guest, &property, bad))
                .await
                .unwrap_err();
            assert!(matches!(err, DbError::Domain(_)), "rating {bad} accepted");
        }
        assert!(db.reviews().for_property(&property).await.unwrap().is_empty());
    }
}
