//! huddle-core
//!
//! Pure domain types, slug generation, and document key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the assessment
//! builder: the admin tooling, the participation API and the store all speak
//! in these types.

pub mod error;
pub mod models;
pub mod slug;
pub mod store_keys;
