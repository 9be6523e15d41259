//! # Validation Module
//!
//! Input validation rules for Haven.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: HTTP layer (external)                                     │
//! │  ├── Shape checks (deserialization)                                 │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  ├── Required fields, formats, ranges                               │
//! │  └── Runs before any query is issued                                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL constraints                                           │
//! │  ├── UNIQUE constraints (email)                                     │
//! │  └── Foreign key constraints                                        │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected payload produces a typed `ValidationError` rather than a
//! silently discarded request, so callers always learn why nothing was
//! inserted.

use crate::error::ValidationError;
use crate::types::{NewProperty, NewUser};
use crate::{MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present and non-empty.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 500 characters
///
/// ## Example
/// ```rust
/// use haven_core::validation::validate_required;
///
/// assert!(validate_required("title", "Cozy loft").is_ok());
/// assert!(validate_required("title", "").is_err());
/// assert!(validate_required("title", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 500 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with text on both sides
///
/// This is deliberately shallow: delivery problems surface at the mail
/// layer, this check only rejects obvious garbage before a query runs.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a nightly rate in cents.
///
/// ## Rules
/// - Must be positive (> 0); a free listing is a data-entry error
pub fn validate_cost_per_night(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "cost_per_night".to_string(),
        });
    }

    Ok(())
}

/// Validates a room or parking count.
///
/// ## Rules
/// - Must be non-negative (0 is fine: a studio has 0 bedrooms)
pub fn validate_count(field: &str, count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a review rating.
///
/// ## Rules
/// - Must be between MIN_RATING (1) and MAX_RATING (5) inclusive
pub fn validate_rating(rating: i64) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a user registration payload.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    validate_required("name", &user.name)?;
    validate_email(&user.email)?;
    validate_required("password", &user.password)?;
    Ok(())
}

/// Validates a new listing payload.
///
/// Every text field is required; an empty string in any of them rejects
/// the whole payload.
pub fn validate_new_property(property: &NewProperty) -> ValidationResult<()> {
    validate_required("owner_id", &property.owner_id)?;
    validate_required("title", &property.title)?;
    validate_required("description", &property.description)?;
    validate_required("thumbnail_photo_url", &property.thumbnail_photo_url)?;
    validate_required("cover_photo_url", &property.cover_photo_url)?;
    validate_required("street", &property.street)?;
    validate_required("city", &property.city)?;
    validate_required("province", &property.province)?;
    validate_required("post_code", &property.post_code)?;
    validate_required("country", &property.country)?;

    validate_cost_per_night(property.cost_per_night_cents)?;
    validate_count("parking_spaces", property.parking_spaces)?;
    validate_count("number_of_bathrooms", property.number_of_bathrooms)?;
    validate_count("number_of_bedrooms", property.number_of_bedrooms)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_property() -> NewProperty {
        NewProperty {
            owner_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            title: "Cozy loft".to_string(),
            description: "Bright one-bedroom downtown".to_string(),
            thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
            cover_photo_url: "https://example.com/cover.jpg".to_string(),
            cost_per_night_cents: 12_000,
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 1,
            street: "123 Main St".to_string(),
            city: "Vancouver".to_string(),
            province: "BC".to_string(),
            post_code: "V5K 0A1".to_string(),
            country: "Canada".to_string(),
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("title", "Cozy loft").is_ok());
        assert!(validate_required("title", "").is_err());
        assert!(validate_required("title", "   ").is_err());
        assert!(validate_required("title", &"A".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("Guest@Example.COM").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("guest@").is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn test_validate_cost_per_night() {
        assert!(validate_cost_per_night(12_000).is_ok());
        assert!(validate_cost_per_night(0).is_err());
        assert!(validate_cost_per_night(-100).is_err());
    }

    #[test]
    fn test_valid_property_passes() {
        assert!(validate_new_property(&sample_property()).is_ok());
    }

    #[test]
    fn test_empty_field_rejects_property() {
        // Any empty text field rejects the whole payload.
        let mut property = sample_property();
        property.title = String::new();
        assert!(validate_new_property(&property).is_err());

        let mut property = sample_property();
        property.post_code = String::new();
        assert!(validate_new_property(&property).is_err());

        let mut property = sample_property();
        property.cover_photo_url = String::new();
        assert!(validate_new_property(&property).is_err());
    }

    #[test]
    fn test_new_user_validation() {
        let user = NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_new_user(&user).is_ok());

        let no_email = NewUser {
            name: "Ada".to_string(),
            email: String::new(),
            password: "secret".to_string(),
        };
        assert!(validate_new_user(&no_email).is_err());
    }
}
