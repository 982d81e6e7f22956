//! Canonical feed model.
//!
//! - [`types`] - the value objects every source format is normalized into
//! - [`schema`] - the declarative field contract and advisory validation

pub mod schema;
mod types;

pub use schema::{validate_feed, SchemaViolation};
pub use types::{Category, Content, Enclosure, Entry, EntryLink, Feed, Image, Person};
