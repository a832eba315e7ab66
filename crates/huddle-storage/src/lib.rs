//! huddle-storage
//!
//! Document persistence. Every aggregate root is one JSON object; the
//! [`store::DocumentStore`] trait abstracts where those objects live (S3 in
//! production, memory in tests and local runs).

pub mod client;
pub mod documents;
pub mod error;
pub mod objects;
pub mod store;
