//! Feed normalization: RSS/Atom documents into the canonical [`Feed`] model.
//!
//! - [`parser`] - the parsing collaborator seam and its `feed-rs` implementation
//! - [`input`] - resolving locations and streams into readable handles
//! - [`primitives`], [`entry`], [`document`] - the mappers, leaves first
//!
//! Data flows one way: source → parser → parse tree → feed mapper → entry
//! mapper → primitive mappers. Nothing is shared between calls.
//!
//! # Example
//!
//! ```no_run
//! use feednorm::feed::{normalize, ParseHints};
//!
//! # fn main() -> Result<(), feednorm::NormalizeError> {
//! let feed = normalize("subscriptions/rust-blog.xml", &ParseHints::default())?;
//! for entry in &feed.entries {
//!     println!("{} {:?}", entry.published_date, entry.title);
//! }
//! # Ok(())
//! # }
//! ```

mod document;
mod entry;
mod input;
mod parser;
mod primitives;

use thiserror::Error;

use crate::config::Config;
use crate::model::{validate_feed, Feed, SchemaViolation};

pub use document::{feed_type_name, map_feed};
pub use entry::map_entry;
pub use input::FeedSource;
pub use parser::{DocumentParser, FeedRsParser, ParseHints, ParsedDocument};
pub use primitives::{
    map_category, map_content, map_image, map_link, map_link_enclosure, map_media_enclosure,
    map_person, map_text,
};

/// Errors that can occur while normalizing a feed document.
///
/// Normalization is all-or-nothing: any of these means no [`Feed`] was
/// produced.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The location could not be opened or the stream could not be read
    #[error("Failed to read feed source {location}: {source}")]
    SourceUnreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },
    /// Document exceeded the configured size limit
    #[error("Feed document exceeds {limit} bytes")]
    DocumentTooLarge { limit: u64 },
    /// Content is not any feed format the parser understands
    #[error("Malformed feed document: {0}")]
    MalformedDocument(String),
    /// A required canonical field had no source value
    #[error("Required field {entity}.{field} is missing")]
    RequiredFieldMissing {
        entity: &'static str,
        field: &'static str,
    },
    /// Output failed the schema contract (only when validation is enabled)
    #[error("Schema validation failed: {0}")]
    SchemaValidation(#[from] SchemaViolation),
}

impl NormalizeError {
    pub(crate) const fn missing(entity: &'static str, field: &'static str) -> Self {
        NormalizeError::RequiredFieldMissing { entity, field }
    }
}

/// Normalizes feeds with one parser and one configuration.
///
/// Holds no per-call state, so a single instance can serve many calls, from
/// many threads if the parser allows it.
#[derive(Debug, Clone)]
pub struct Normalizer<P = FeedRsParser> {
    parser: P,
    config: Config,
}

impl Normalizer<FeedRsParser> {
    pub fn new(config: Config) -> Self {
        let parser = FeedRsParser::new(config.max_document_bytes);
        Self { parser, config }
    }
}

impl Default for Normalizer<FeedRsParser> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<P: DocumentParser> Normalizer<P> {
    /// Uses a custom parsing collaborator.
    pub fn with_parser(parser: P, config: Config) -> Self {
        Self { parser, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Reads, parses and maps one document.
    ///
    /// The stream opened for `source` is released before this returns, on
    /// success and on every error path.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::SourceUnreadable`] if the source cannot be opened or read
    /// - [`NormalizeError::DocumentTooLarge`] if it exceeds `max_document_bytes`
    /// - [`NormalizeError::MalformedDocument`] if the parser rejects it
    /// - [`NormalizeError::RequiredFieldMissing`] if a required field is absent
    /// - [`NormalizeError::SchemaValidation`] if `validate_output` is on and the
    ///   result breaks the contract
    pub fn normalize<'a>(
        &self,
        source: impl Into<FeedSource<'a>>,
    ) -> Result<Feed, NormalizeError> {
        let source = source.into();
        let location = source.describe().to_string();

        let document = {
            let mut reader = source.open()?;
            self.parser.parse(&mut reader, &location, &self.config.hints)?
        };

        let feed = map_feed(document).inspect_err(|e| {
            tracing::debug!(location = %location, error = %e, "Feed mapping failed");
        })?;

        if self.config.validate_output {
            validate_feed(&feed)?;
        }

        tracing::debug!(
            location = %location,
            feed_type = ?feed.feed_type,
            entries = feed.entries.len(),
            "Normalized feed"
        );
        Ok(feed)
    }
}

/// Normalizes one document with the default `feed-rs` parser.
///
/// Shorthand for `Normalizer::new` with `hints` and default settings
/// otherwise.
pub fn normalize<'a>(
    source: impl Into<FeedSource<'a>>,
    hints: &ParseHints,
) -> Result<Feed, NormalizeError> {
    let config = Config {
        hints: hints.clone(),
        ..Config::default()
    };
    Normalizer::new(config).normalize(source)
}
