//! Normalizes syndicated feeds (RSS 0.9x/1.0/2.0, Atom, JSON Feed) into one
//! canonical, strongly-typed model.
//!
//! Parsing is delegated to `feed-rs`; this crate owns the mapping rules,
//! optionality contracts and ordering guarantees that turn its parse tree
//! into a [`Feed`].
//!
//! ```
//! use feednorm::{normalize, ParseHints};
//!
//! let xml = br#"<rss version="2.0"><channel>
//!   <title>Example</title>
//!   <link>https://example.com/</link>
//!   <description>An example feed</description>
//!   <item>
//!     <title>Hello</title>
//!     <pubDate>Mon, 06 Sep 2021 16:45:00 +0000</pubDate>
//!   </item>
//! </channel></rss>"#;
//!
//! let feed = normalize(&xml[..], &ParseHints::default()).unwrap();
//! assert_eq!(feed.title.as_deref(), Some("Example"));
//! assert_eq!(feed.entries.len(), 1);
//! ```

pub mod config;
pub mod feed;
pub mod model;

pub use config::{Config, ConfigError};
pub use feed::{normalize, FeedSource, NormalizeError, Normalizer, ParseHints};
pub use model::{Category, Content, Enclosure, Entry, EntryLink, Feed, Image, Person};
