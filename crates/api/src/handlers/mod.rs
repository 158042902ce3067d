pub mod health;
pub mod occurrences;
pub mod websites;
