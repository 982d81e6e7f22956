use std::io::Read;

use feed_rs::parser::{Builder, ParseFeedError};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use super::NormalizeError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Hints forwarded to the parsing collaborator.
///
/// The normalizer never interprets these; only a [`DocumentParser`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseHints {
    /// Content type the document was served with, e.g.
    /// `application/rss+xml; charset=ISO-8859-1`.
    pub content_type: Option<String>,
    /// Tolerate minor structural defects.
    pub lenient: bool,
    /// Character set reported when the document declares none.
    pub default_encoding: Option<String>,
}

/// Output of the parsing collaborator: the feed-rs parse tree plus the
/// character set the document declared.
#[derive(Debug)]
pub struct ParsedDocument {
    pub feed: feed_rs::model::Feed,
    pub encoding: Option<String>,
}

/// Seam to the external feed parser.
///
/// Implementations read the whole stream, detect the dialect and build the
/// parse tree. `location` only labels errors.
pub trait DocumentParser {
    fn parse(
        &self,
        reader: &mut dyn Read,
        location: &str,
        hints: &ParseHints,
    ) -> Result<ParsedDocument, NormalizeError>;
}

/// [`DocumentParser`] backed by `feed-rs`, which handles RSS 0.9x/1.0/2.0,
/// Atom and JSON Feed.
#[derive(Debug, Clone)]
pub struct FeedRsParser {
    max_document_bytes: u64,
}

impl FeedRsParser {
    /// 10MB
    pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

    pub fn new(max_document_bytes: u64) -> Self {
        Self { max_document_bytes }
    }
}

impl Default for FeedRsParser {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

impl DocumentParser for FeedRsParser {
    fn parse(
        &self,
        reader: &mut dyn Read,
        location: &str,
        hints: &ParseHints,
    ) -> Result<ParsedDocument, NormalizeError> {
        // Read one byte past the limit so an oversized document is detectable
        let mut bytes = Vec::new();
        reader
            .take(self.max_document_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|source| NormalizeError::SourceUnreadable {
                location: location.to_string(),
                source,
            })?;
        if bytes.len() as u64 > self.max_document_bytes {
            return Err(NormalizeError::DocumentTooLarge {
                limit: self.max_document_bytes,
            });
        }

        // Before the lenient skip, which would also drop a byte-order mark
        let encoding = detect_encoding(&bytes, hints);
        let body = if hints.lenient {
            skip_leading_junk(&bytes)
        } else {
            &bytes[..]
        };

        // feed-rs would otherwise invent ids (link hashes or random UUIDs)
        // for feeds and entries that carry none
        let parser = Builder::new().id_generator(|_, _, _| String::new()).build();
        let feed = parser.parse(body).map_err(|e| match e {
            ParseFeedError::IoError(source) => NormalizeError::SourceUnreadable {
                location: location.to_string(),
                source,
            },
            other => NormalizeError::MalformedDocument(other.to_string()),
        })?;

        tracing::debug!(
            location = %location,
            encoding = ?encoding,
            entries = feed.entries.len(),
            "Parsed feed document"
        );

        Ok(ParsedDocument { feed, encoding })
    }
}

/// Reports the declared character set: byte-order mark, then the content-type
/// `charset` parameter, then the XML declaration, then the default hint.
fn detect_encoding(bytes: &[u8], hints: &ParseHints) -> Option<String> {
    if bytes.starts_with(UTF8_BOM) {
        return Some("UTF-8".to_string());
    }

    hints
        .content_type
        .as_deref()
        .and_then(charset_param)
        .or_else(|| declared_encoding(skip_leading_junk(bytes)))
        .or_else(|| hints.default_encoding.clone())
}

fn charset_param(content_type: &str) -> Option<String> {
    let charset = content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    });

    match charset {
        Some(c) if c.is_empty() => {
            tracing::warn!(content_type = %content_type, "Ignoring empty charset in content type");
            None
        }
        other => other,
    }
}

/// Reads the `encoding` pseudo-attribute of the XML declaration, if the
/// document starts with one.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    // Leading whitespace is trimmed, so the declaration must be the first event
    let encoding = match reader.read_event_into(&mut buf) {
        Ok(Event::Decl(decl)) => decl
            .encoding()
            .and_then(|enc| enc.ok())
            .map(|enc| String::from_utf8_lossy(&enc).into_owned()),
        _ => None,
    };
    encoding
}

/// Drops everything before the first markup (`<`) or JSON (`{`) byte.
fn skip_leading_junk(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|b| *b == b'<' || *b == b'{') {
        Some(start) => &bytes[start..],
        None => bytes,
    }
}
