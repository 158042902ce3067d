//! Steamshark domain logic.
//!
//! Pure, database-free building blocks shared by the persistence and HTTP
//! layers: the error taxonomy, the risk classifier, input validation and the
//! pagination / filter arithmetic used by website listings.

pub mod error;
pub mod occurrence;
pub mod pagination;
pub mod risk;
pub mod types;
pub mod website;
