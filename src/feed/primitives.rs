//! Leaf mappers: one feed-rs node in, one canonical value object out.
//!
//! feed-rs already exposes every RSS/Atom/JSON variant through one model, so
//! nothing here branches on the source format. feed-rs reports some absent
//! sub-elements as empty strings; those are mapped to `None` (or to
//! [`NormalizeError::RequiredFieldMissing`] for required fields).

use feed_rs::model as source;

use super::NormalizeError;
use crate::model::{Category, Content, Enclosure, EntryLink, Image, Person};

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn map_person(person: source::Person) -> Person {
    Person {
        email: person.email.and_then(non_empty),
        name: non_empty(person.name),
        uri: person.uri.and_then(non_empty),
    }
}

pub fn map_category(category: source::Category) -> Result<Category, NormalizeError> {
    Ok(Category {
        name: non_empty(category.term).ok_or(NormalizeError::missing("Category", "name"))?,
        taxonomy_uri: category.scheme.and_then(non_empty),
    })
}

/// Maps a text construct (title, summary, ...) to a content block.
pub fn map_text(text: source::Text) -> Content {
    Content {
        content_type: text.content_type.to_string(),
        value: text.content,
    }
}

/// Maps an entry body. Out-of-line content (a `src` with no inline body)
/// has no value and is rejected.
pub fn map_content(content: source::Content) -> Result<Content, NormalizeError> {
    Ok(Content {
        content_type: content.content_type.to_string(),
        value: content
            .body
            .ok_or(NormalizeError::missing("Content", "value"))?,
    })
}

/// Maps a media item (RSS `<enclosure>`, `media:content`).
pub fn map_media_enclosure(media: source::MediaContent) -> Result<Enclosure, NormalizeError> {
    Ok(Enclosure {
        url: media
            .url
            .map(|url| url.to_string())
            .ok_or(NormalizeError::missing("Enclosure", "url"))?,
        content_type: media
            .content_type
            .map(|mime| mime.to_string())
            .ok_or(NormalizeError::missing("Enclosure", "type"))?,
        length: media
            .size
            .ok_or(NormalizeError::missing("Enclosure", "length"))?,
    })
}

/// Maps an Atom `rel="enclosure"` link.
pub fn map_link_enclosure(link: source::Link) -> Result<Enclosure, NormalizeError> {
    Ok(Enclosure {
        url: non_empty(link.href).ok_or(NormalizeError::missing("Enclosure", "url"))?,
        content_type: link
            .media_type
            .and_then(non_empty)
            .ok_or(NormalizeError::missing("Enclosure", "type"))?,
        length: link
            .length
            .ok_or(NormalizeError::missing("Enclosure", "length"))?,
    })
}

pub fn map_link(link: source::Link) -> Result<EntryLink, NormalizeError> {
    Ok(EntryLink {
        href: non_empty(link.href).ok_or(NormalizeError::missing("EntryLink", "href"))?,
        hreflang: link.href_lang.and_then(non_empty),
        length: link.length.unwrap_or(0),
        rel: link.rel.and_then(non_empty),
        title: link.title.and_then(non_empty),
        content_type: link.media_type.and_then(non_empty),
    })
}

pub fn map_image(image: source::Image) -> Image {
    Image {
        description: image.description.and_then(non_empty),
        link: image.link.and_then(|link| non_empty(link.href)),
        title: image.title.and_then(non_empty),
        url: non_empty(image.uri),
    }
}

/// feed-rs files RSS `<enclosure>` and loose Media RSS items in the same
/// list. Media RSS makes type and size optional, so only items carrying all
/// three enclosure attributes count as enclosures.
pub(crate) fn is_complete_media(media: &source::MediaContent) -> bool {
    media.url.is_some() && media.content_type.is_some() && media.size.is_some()
}

pub(crate) fn is_enclosure(link: &source::Link) -> bool {
    link.rel.as_deref() == Some("enclosure")
}

/// The document's own page: the first link without a `rel` or with
/// `rel="alternate"`, else the first link that is not an enclosure.
pub(crate) fn alternate_link(links: &[source::Link]) -> Option<String> {
    links
        .iter()
        .find(|link| matches!(link.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.iter().find(|link| !is_enclosure(link)))
        .and_then(|link| non_empty(link.href.clone()))
}

pub(crate) fn first_author_name(authors: &[source::Person]) -> Option<String> {
    authors
        .first()
        .and_then(|person| non_empty(person.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(href: &str, rel: Option<&str>) -> source::Link {
        source::Link {
            href: href.to_string(),
            rel: rel.map(str::to_string),
            media_type: None,
            href_lang: None,
            title: None,
            length: None,
        }
    }

    fn image(uri: &str, title: Option<&str>) -> source::Image {
        source::Image {
            uri: uri.to_string(),
            title: title.map(str::to_string),
            link: None,
            width: None,
            height: None,
            description: None,
        }
    }

    #[test]
    fn test_person_unset_fields_stay_absent() {
        let person = map_person(source::Person {
            name: "Jane".to_string(),
            uri: None,
            email: Some(String::new()),
        });
        assert_eq!(
            person,
            Person {
                email: None,
                name: Some("Jane".to_string()),
                uri: None,
            }
        );
    }

    #[test]
    fn test_person_empty_name_is_absent() {
        let person = map_person(source::Person {
            name: String::new(),
            uri: Some("https://jane.example".to_string()),
            email: Some("jane@example.com".to_string()),
        });
        assert_eq!(person.name, None);
        assert_eq!(person.email.as_deref(), Some("jane@example.com"));
        assert_eq!(person.uri.as_deref(), Some("https://jane.example"));
    }

    #[test]
    fn test_category_with_taxonomy() {
        let category = map_category(source::Category {
            term: "rust".to_string(),
            scheme: Some("https://example.com/tags".to_string()),
            label: Some("Rust".to_string()),
            subcategories: Vec::new(),
        })
        .unwrap();
        assert_eq!(category.name, "rust");
        assert_eq!(
            category.taxonomy_uri.as_deref(),
            Some("https://example.com/tags")
        );
    }

    #[test]
    fn test_category_without_name_fails() {
        let err = map_category(source::Category {
            term: String::new(),
            scheme: None,
            label: None,
            subcategories: Vec::new(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::RequiredFieldMissing {
                entity: "Category",
                field: "name"
            }
        ));
    }

    #[test]
    fn test_link_maps_every_field() {
        let mapped = map_link(source::Link {
            href: "https://example.com/feed.xml".to_string(),
            rel: Some("self".to_string()),
            media_type: Some("application/rss+xml".to_string()),
            href_lang: Some("en".to_string()),
            title: Some("Self".to_string()),
            length: Some(42),
        })
        .unwrap();
        assert_eq!(
            mapped,
            EntryLink {
                href: "https://example.com/feed.xml".to_string(),
                hreflang: Some("en".to_string()),
                length: 42,
                rel: Some("self".to_string()),
                title: Some("Self".to_string()),
                content_type: Some("application/rss+xml".to_string()),
            }
        );
    }

    #[test]
    fn test_link_without_length_defaults_to_zero() {
        let mapped = map_link(link("https://example.com", None)).unwrap();
        assert_eq!(mapped.length, 0);
        assert_eq!(mapped.rel, None);
    }

    #[test]
    fn test_link_enclosure_requires_type_and_length() {
        let mut source_link = link("https://example.com/a.mp3", Some("enclosure"));
        source_link.media_type = Some("audio/mpeg".to_string());
        let err = map_link_enclosure(source_link.clone()).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::RequiredFieldMissing {
                entity: "Enclosure",
                field: "length"
            }
        ));

        source_link.length = Some(0);
        let enclosure = map_link_enclosure(source_link).unwrap();
        assert_eq!(enclosure.length, 0);
        assert_eq!(enclosure.content_type, "audio/mpeg");
    }

    #[test]
    fn test_image_with_only_title() {
        let mapped = map_image(image("", Some("Logo")));
        assert_eq!(
            mapped,
            Image {
                description: None,
                link: None,
                title: Some("Logo".to_string()),
                url: None,
            }
        );
    }

    #[test]
    fn test_image_link_uses_href() {
        let mut source_image = image("https://example.com/logo.png", None);
        source_image.link = Some(link("https://example.com", None));
        let mapped = map_image(source_image);
        assert_eq!(mapped.link.as_deref(), Some("https://example.com"));
        assert_eq!(mapped.url.as_deref(), Some("https://example.com/logo.png"));
    }

    #[test]
    fn test_alternate_link_selection() {
        let links = vec![
            link("https://example.com/feed.xml", Some("self")),
            link("https://example.com/a.mp3", Some("enclosure")),
            link("https://example.com/post", Some("alternate")),
        ];
        assert_eq!(
            alternate_link(&links).as_deref(),
            Some("https://example.com/post")
        );

        let links = vec![
            link("https://example.com/a.mp3", Some("enclosure")),
            link("https://example.com/feed.xml", Some("self")),
        ];
        assert_eq!(
            alternate_link(&links).as_deref(),
            Some("https://example.com/feed.xml")
        );

        assert_eq!(alternate_link(&[]), None);
    }
}
