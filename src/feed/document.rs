use feed_rs::model::FeedType;

use super::entry::map_entry;
use super::parser::ParsedDocument;
use super::primitives::{
    alternate_link, first_author_name, map_category, map_image, map_link, map_person, non_empty,
};
use super::NormalizeError;
use crate::model::Feed;

/// Builds the canonical [`Feed`] from a parsed document.
pub fn map_feed(document: ParsedDocument) -> Result<Feed, NormalizeError> {
    let ParsedDocument { mut feed, encoding } = document;
    if copies_published_into_updated(&feed.feed_type) {
        for entry in &mut feed.entries {
            if entry.updated == entry.published {
                entry.updated = None;
            }
        }
    }
    let author = first_author_name(&feed.authors);
    let link = alternate_link(&feed.links);

    Ok(Feed {
        authors: feed.authors.into_iter().map(map_person).collect(),
        categories: feed
            .categories
            .into_iter()
            .map(map_category)
            .collect::<Result<_, _>>()?,
        contributors: feed.contributors.into_iter().map(map_person).collect(),
        entries: feed
            .entries
            .into_iter()
            .map(map_entry)
            .collect::<Result<_, _>>()?,
        entry_links: feed
            .links
            .into_iter()
            .map(map_link)
            .collect::<Result<_, _>>()?,
        image: feed.logo.or(feed.icon).map(map_image),
        author,
        copyright: feed.rights.map(|t| t.content),
        description: feed.description.map(|t| t.content),
        encoding,
        feed_type: Some(feed_type_name(&feed.feed_type).to_string()),
        language: feed.language.and_then(non_empty),
        link,
        published_date: feed.published.or(feed.updated),
        title: feed.title.map(|t| t.content),
        uri: non_empty(feed.id),
    })
}

/// feed-rs fills an RSS item's missing update time with its publish time.
fn copies_published_into_updated(feed_type: &FeedType) -> bool {
    matches!(feed_type, FeedType::RSS0 | FeedType::RSS2)
}

pub fn feed_type_name(feed_type: &FeedType) -> &'static str {
    match feed_type {
        FeedType::Atom => "atom_1.0",
        FeedType::JSON => "json_1.1",
        FeedType::RSS0 => "rss_0.9x",
        FeedType::RSS1 => "rss_1.0",
        FeedType::RSS2 => "rss_2.0",
    }
}
