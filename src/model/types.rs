use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// An author or contributor. Every field is optional because no feed format
/// requires any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub email: Option<String>,
    pub name: Option<String>,
    pub uri: Option<String>,
}

/// A category label with its optional taxonomy (RSS `domain`, Atom `scheme`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub taxonomy_uri: Option<String>,
}

/// One content block (body, summary, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Media type of `value`, e.g. `text/html`.
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// A media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes, exactly as declared by the source.
    pub length: u64,
}

/// A link declared at feed level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLink {
    pub href: String,
    pub hreflang: Option<String>,
    /// Declared size in bytes, 0 when the source declares none.
    pub length: u64,
    pub rel: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// Feed image (RSS `<image>`, Atom `<logo>`/`<icon>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub description: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

// ============================================================================
// Entry / Feed
// ============================================================================

/// One normalized feed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub authors: Vec<Person>,
    pub categories: Vec<Category>,
    pub contents: Vec<Content>,
    pub contributors: Vec<Person>,
    pub enclosures: Vec<Enclosure>,
    pub description: Option<Content>,
    /// Name of the first author, if any.
    pub author: Option<String>,
    pub link: Option<String>,
    pub published_date: DateTime<Utc>,
    pub title: Option<String>,
    pub updated_date: Option<DateTime<Utc>>,
    pub uri: Option<String>,
}

/// The canonical feed, independent of the source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub authors: Vec<Person>,
    pub categories: Vec<Category>,
    pub contributors: Vec<Person>,
    pub entries: Vec<Entry>,
    pub entry_links: Vec<EntryLink>,
    pub image: Option<Image>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub description: Option<String>,
    /// Character set the document declared; `None` when nothing was declared.
    pub encoding: Option<String>,
    /// Source format, e.g. `rss_2.0` or `atom_1.0`.
    pub feed_type: Option<String>,
    pub language: Option<String>,
    pub link: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub uri: Option<String>,
}
