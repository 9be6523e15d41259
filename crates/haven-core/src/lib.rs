//! # haven-core: Pure Domain Logic for Haven
//!
//! This crate contains the domain model of the Haven rental platform as
//! pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Haven Architecture                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │               HTTP Layer (external collaborator)              │  │
//! │  │     /users ──► /properties ──► /reservations endpoints        │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │               ★ haven-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐  │  │
//! │  │   │   types   │  │   money   │  │validation │  │  error   │  │  │
//! │  │   │   User    │  │   Money   │  │   rules   │  │  typed   │  │  │
//! │  │   │ Property  │  │  (cents)  │  │  checks   │  │  errors  │  │  │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └──────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                  haven-db (Database Layer)                    │  │
//! │  │           SQLite queries, migrations, repositories            │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Property, Reservation, PropertyReview)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use haven_core::money::Money;
//!
//! // Nightly rates are stored in cents (never floats!)
//! let rate = Money::from_major(120); // $120 per night
//! assert_eq!(rate.cents(), 12_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use haven_core::Money` instead of
// `use haven_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of rows returned by listing queries when the caller
/// does not supply a limit.
///
/// ## Why a constant?
/// Reservation history and property search share the same page size, and
/// the HTTP layer relies on it being stable across both.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Lowest rating a guest can leave on a property review.
pub const MIN_RATING: i64 = 1;

/// Highest rating a guest can leave on a property review.
pub const MAX_RATING: i64 = 5;
