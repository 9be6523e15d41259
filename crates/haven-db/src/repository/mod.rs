//! # Repository Module
//!
//! Database repository implementations for Haven.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API.                                                               │
//! │                                                                     │
//! │  HTTP handler                                                       │
//! │       │                                                             │
//! │       │  db.properties().search(&filters, 10)                       │
//! │       ▼                                                             │
//! │  PropertyRepository                                                 │
//! │  ├── search(&self, filters, limit)                                  │
//! │  ├── get_by_id(&self, id)                                           │
//! │  └── insert(&self, new_property)                                    │
//! │       │                                                             │
//! │       │  Parameterized SQL (one round-trip per call)                │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • Clean separation of concerns                                     │
//! │  • SQL is isolated in one place                                     │
//! │  • Filter assembly is testable without a live database              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`] - User lookup and registration
//! - [`PropertyRepository`] - Listing search, lookup, and insertion
//! - [`ReservationRepository`] - Guest reservation history and booking
//! - [`ReviewRepository`] - Review insertion and rating aggregates
//!
//! [`UserRepository`]: user::UserRepository
//! [`PropertyRepository`]: property::PropertyRepository
//! [`ReservationRepository`]: reservation::ReservationRepository
//! [`ReviewRepository`]: review::ReviewRepository

pub mod property;
pub mod reservation;
pub mod review;
pub mod user;
