//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod occurrence_repo;
pub mod website_repo;

pub use occurrence_repo::OccurrenceRepo;
pub use website_repo::WebsiteRepo;
