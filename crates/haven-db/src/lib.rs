//! # haven-db: Database Layer for Haven
//!
//! This crate provides database access for the Haven rental platform.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Haven Data Flow                              │
//! │                                                                     │
//! │  HTTP handler (GET /properties?city=...)                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    haven-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌──────────────┐   │  │
//! │  │   │   Database   │   │  Repositories  │   │  Migrations  │   │  │
//! │  │   │  (pool.rs)   │   │  (user.rs,     │   │  (embedded)  │   │  │
//! │  │   │              │   │   property.rs, │   │              │   │  │
//! │  │   │  SqlitePool  │◄──│   ...)         │   │ 001_init.sql │   │  │
//! │  │   └──────────────┘   └────────────────┘   └──────────────┘   │  │
//! │  │                                                               │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (path supplied via configuration)             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, property, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use haven_db::{Database, DbConfig};
//!
//! // Configuration comes from the environment, never from constants
//! let config = DbConfig::from_env()?;
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let user = db.users().get_by_email("guest@example.com").await?;
//! let listings = db.properties().search(&search, 10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::property::PropertyRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::review::ReviewRepository;
pub use repository::user::UserRepository;
