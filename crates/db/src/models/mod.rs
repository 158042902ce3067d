//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO and its normalized insert form
//! - The outbound shapes the HTTP layer renders

pub mod occurrence;
pub mod website;
