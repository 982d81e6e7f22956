use feed_rs::model as source;

use super::primitives::{
    alternate_link, first_author_name, is_complete_media, is_enclosure, map_category, map_content,
    map_link_enclosure, map_media_enclosure, map_person, map_text, non_empty,
};
use super::NormalizeError;
use crate::model::{Enclosure, Entry};

/// Builds one canonical [`Entry`] from one feed-rs entry.
///
/// Collections keep source order. Enclosures are the media items that carry
/// a URL, type and size, followed by `rel="enclosure"` links.
///
/// # Errors
///
/// [`NormalizeError::RequiredFieldMissing`] when the entry has no published
/// timestamp or a nested required field is absent.
pub fn map_entry(entry: source::Entry) -> Result<Entry, NormalizeError> {
    let published_date = entry
        .published
        .ok_or(NormalizeError::missing("Entry", "publishedDate"))?;
    let author = first_author_name(&entry.authors);
    let link = alternate_link(&entry.links);

    let (complete, partial): (Vec<_>, Vec<_>) = entry
        .media
        .into_iter()
        .flat_map(|media| media.content)
        .filter(|content| content.url.is_some())
        .partition(is_complete_media);
    if !partial.is_empty() {
        tracing::debug!(
            skipped = partial.len(),
            "Media items without type or size are not enclosures"
        );
    }
    let mut enclosures = complete
        .into_iter()
        .map(map_media_enclosure)
        .collect::<Result<Vec<Enclosure>, _>>()?;
    for link in entry.links.into_iter().filter(is_enclosure) {
        enclosures.push(map_link_enclosure(link)?);
    }

    Ok(Entry {
        authors: entry.authors.into_iter().map(map_person).collect(),
        categories: entry
            .categories
            .into_iter()
            .map(map_category)
            .collect::<Result<_, _>>()?,
        contents: entry.content.map(map_content).transpose()?.into_iter().collect(),
        contributors: entry.contributors.into_iter().map(map_person).collect(),
        enclosures,
        description: entry.summary.map(map_text),
        author,
        link,
        published_date,
        title: entry.title.map(|t| t.content),
        updated_date: entry.updated,
        uri: non_empty(entry.id),
    })
}
