//! Declarative contract for every canonical entity.
//!
//! The tables below are the single source of truth for which fields each
//! entity carries, which of them are required, and what kind of value each
//! holds. They are consulted by [`validate_feed`] (advisory validation,
//! enabled through `Config::validate_output`) and by the test suites; the
//! mappers never read them.
//!
//! Validation works on the serialized (`serde_json`) form of an entity, so
//! the field names here are the camelCase wire names.

use chrono::DateTime;
use serde_json::Value;
use thiserror::Error;

use super::types::Feed;

// ============================================================================
// Contract Types
// ============================================================================

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative integer.
    Number,
    /// RFC 3339 timestamp.
    Timestamp,
    /// A nested entity.
    Entity(&'static EntitySchema),
    /// An ordered list of nested entities.
    List(&'static EntitySchema),
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "non-negative integer",
            FieldKind::Timestamp => "RFC 3339 timestamp",
            FieldKind::Entity(_) => "object",
            FieldKind::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        kind,
    }
}

// ============================================================================
// Entity Tables
// ============================================================================

pub static PERSON: EntitySchema = EntitySchema {
    name: "Person",
    fields: &[
        optional("email", FieldKind::Text),
        optional("name", FieldKind::Text),
        optional("uri", FieldKind::Text),
    ],
};

pub static CATEGORY: EntitySchema = EntitySchema {
    name: "Category",
    fields: &[
        required("name", FieldKind::Text),
        optional("taxonomyUri", FieldKind::Text),
    ],
};

pub static CONTENT: EntitySchema = EntitySchema {
    name: "Content",
    fields: &[
        required("type", FieldKind::Text),
        required("value", FieldKind::Text),
    ],
};

pub static ENCLOSURE: EntitySchema = EntitySchema {
    name: "Enclosure",
    fields: &[
        required("url", FieldKind::Text),
        required("type", FieldKind::Text),
        required("length", FieldKind::Number),
    ],
};

pub static ENTRY_LINK: EntitySchema = EntitySchema {
    name: "EntryLink",
    fields: &[
        required("href", FieldKind::Text),
        optional("hreflang", FieldKind::Text),
        required("length", FieldKind::Number),
        optional("rel", FieldKind::Text),
        optional("title", FieldKind::Text),
        optional("type", FieldKind::Text),
    ],
};

pub static IMAGE: EntitySchema = EntitySchema {
    name: "Image",
    fields: &[
        optional("description", FieldKind::Text),
        optional("link", FieldKind::Text),
        optional("title", FieldKind::Text),
        optional("url", FieldKind::Text),
    ],
};

pub static ENTRY: EntitySchema = EntitySchema {
    name: "Entry",
    fields: &[
        required("authors", FieldKind::List(&PERSON)),
        required("categories", FieldKind::List(&CATEGORY)),
        required("contents", FieldKind::List(&CONTENT)),
        required("contributors", FieldKind::List(&PERSON)),
        required("enclosures", FieldKind::List(&ENCLOSURE)),
        optional("description", FieldKind::Entity(&CONTENT)),
        optional("author", FieldKind::Text),
        optional("link", FieldKind::Text),
        required("publishedDate", FieldKind::Timestamp),
        optional("title", FieldKind::Text),
        optional("updatedDate", FieldKind::Timestamp),
        optional("uri", FieldKind::Text),
    ],
};

pub static FEED: EntitySchema = EntitySchema {
    name: "Feed",
    fields: &[
        required("authors", FieldKind::List(&PERSON)),
        required("categories", FieldKind::List(&CATEGORY)),
        required("contributors", FieldKind::List(&PERSON)),
        required("entries", FieldKind::List(&ENTRY)),
        required("entryLinks", FieldKind::List(&ENTRY_LINK)),
        optional("image", FieldKind::Entity(&IMAGE)),
        optional("author", FieldKind::Text),
        optional("copyright", FieldKind::Text),
        optional("description", FieldKind::Text),
        optional("encoding", FieldKind::Text),
        optional("feedType", FieldKind::Text),
        optional("language", FieldKind::Text),
        optional("link", FieldKind::Text),
        optional("publishedDate", FieldKind::Timestamp),
        optional("title", FieldKind::Text),
        optional("uri", FieldKind::Text),
    ],
};

// ============================================================================
// Validation
// ============================================================================

/// A contract violation, located by a dotted path such as
/// `Feed.entries[2].publishedDate`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("{path}: required field is missing")]
    MissingField { path: String },

    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("{path}: field is not declared by the {entity} contract")]
    UndeclaredField { path: String, entity: &'static str },

    #[error("Failed to serialize {entity} for validation: {message}")]
    Serialize {
        entity: &'static str,
        message: String,
    },
}

/// Checks a normalized feed against [`FEED`].
pub fn validate_feed(feed: &Feed) -> Result<(), SchemaViolation> {
    let value = serde_json::to_value(feed).map_err(|e| SchemaViolation::Serialize {
        entity: FEED.name,
        message: e.to_string(),
    })?;
    validate(&FEED, &value)
}

/// Checks a serialized entity against `schema`, recursing into nested
/// entities and list elements.
pub fn validate(schema: &EntitySchema, value: &Value) -> Result<(), SchemaViolation> {
    validate_at(schema, value, schema.name)
}

fn validate_at(schema: &EntitySchema, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let object = value.as_object().ok_or_else(|| SchemaViolation::WrongType {
        path: path.to_string(),
        expected: "object",
    })?;

    if let Some(key) = object.keys().find(|key| schema.field(key).is_none()) {
        return Err(SchemaViolation::UndeclaredField {
            path: format!("{path}.{key}"),
            entity: schema.name,
        });
    }

    for field in schema.fields {
        let field_path = format!("{path}.{}", field.name);
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(SchemaViolation::MissingField { path: field_path });
                }
            }
            Some(value) => check_kind(field.kind, value, &field_path)?,
        }
    }

    Ok(())
}

fn check_kind(kind: FieldKind, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let wrong_type = || SchemaViolation::WrongType {
        path: path.to_string(),
        expected: kind.describe(),
    };

    match kind {
        FieldKind::Text if value.is_string() => Ok(()),
        FieldKind::Number if value.as_u64().is_some() => Ok(()),
        FieldKind::Timestamp => match value.as_str() {
            Some(s) if DateTime::parse_from_rfc3339(s).is_ok() => Ok(()),
            _ => Err(wrong_type()),
        },
        FieldKind::Entity(schema) => validate_at(schema, value, path),
        FieldKind::List(schema) => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            for (i, item) in items.iter().enumerate() {
                validate_at(schema, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        FieldKind::Text | FieldKind::Number => Err(wrong_type()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Content, Enclosure, Entry, Image, Person};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_entry() -> Entry {
        Entry {
            authors: vec![Person {
                name: Some("Jane".to_string()),
                ..Person::default()
            }],
            categories: vec![Category {
                name: "rust".to_string(),
                taxonomy_uri: None,
            }],
            contents: vec![Content {
                content_type: "text/html".to_string(),
                value: "<p>hi</p>".to_string(),
            }],
            contributors: Vec::new(),
            enclosures: vec![Enclosure {
                url: "https://example.com/a.mp3".to_string(),
                content_type: "audio/mpeg".to_string(),
                length: 0,
            }],
            description: None,
            author: Some("Jane".to_string()),
            link: Some("https://example.com/1".to_string()),
            published_date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            title: Some("First".to_string()),
            updated_date: None,
            uri: None,
        }
    }

    fn sample_feed() -> Feed {
        Feed {
            authors: Vec::new(),
            categories: Vec::new(),
            contributors: Vec::new(),
            entries: vec![sample_entry()],
            entry_links: Vec::new(),
            image: Some(Image {
                title: Some("Logo".to_string()),
                ..Image::default()
            }),
            author: None,
            copyright: None,
            description: None,
            encoding: None,
            feed_type: Some("rss_2.0".to_string()),
            language: None,
            link: None,
            published_date: None,
            title: Some("Example".to_string()),
            uri: Some("urn:example".to_string()),
        }
    }

    #[test]
    fn test_well_formed_feed_passes() {
        assert_eq!(validate_feed(&sample_feed()), Ok(()));
    }

    #[test]
    fn test_every_serialized_feed_field_is_declared() {
        let value = serde_json::to_value(sample_feed()).unwrap();
        let keys = value.as_object().unwrap().keys();
        for key in keys {
            assert!(FEED.field(key).is_some(), "undeclared field {key}");
        }
        assert_eq!(FEED.fields.len(), value.as_object().unwrap().len());
    }

    #[test]
    fn test_feed_uri_is_optional_text() {
        let uri = FEED.field("uri").unwrap();
        assert!(!uri.required);
        assert_eq!(uri.kind, FieldKind::Text);
    }

    #[test]
    fn test_entry_required_fields() {
        let names: Vec<_> = ENTRY.required_fields().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "authors",
                "categories",
                "contents",
                "contributors",
                "enclosures",
                "publishedDate"
            ]
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut value = serde_json::to_value(sample_feed()).unwrap();
        value["entries"][0]
            .as_object_mut()
            .unwrap()
            .remove("publishedDate");

        assert_eq!(
            validate(&FEED, &value),
            Err(SchemaViolation::MissingField {
                path: "Feed.entries[0].publishedDate".to_string()
            })
        );
    }

    #[test]
    fn test_null_required_field_is_rejected() {
        let value = json!({ "name": null, "taxonomyUri": "https://example.com/tax" });
        assert_eq!(
            validate(&CATEGORY, &value),
            Err(SchemaViolation::MissingField {
                path: "Category.name".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_element_type_is_rejected() {
        let value = json!({ "url": "https://example.com/a.mp3", "type": "audio/mpeg", "length": -1 });
        assert_eq!(
            validate(&ENCLOSURE, &value),
            Err(SchemaViolation::WrongType {
                path: "Enclosure.length".to_string(),
                expected: "non-negative integer"
            })
        );
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut value = serde_json::to_value(sample_entry()).unwrap();
        value["updatedDate"] = json!("yesterday");
        assert!(matches!(
            validate(&ENTRY, &value),
            Err(SchemaViolation::WrongType { path, .. }) if path == "Entry.updatedDate"
        ));
    }

    #[test]
    fn test_undeclared_field_is_rejected() {
        let value = json!({ "name": "Jane", "nickname": "J" });
        assert_eq!(
            validate(&PERSON, &value),
            Err(SchemaViolation::UndeclaredField {
                path: "Person.nickname".to_string(),
                entity: "Person"
            })
        );
    }

    #[test]
    fn test_optional_nested_entity_is_validated_when_present() {
        let mut value = serde_json::to_value(sample_entry()).unwrap();
        value["description"] = json!({ "type": "text/plain" });
        assert_eq!(
            validate(&ENTRY, &value),
            Err(SchemaViolation::MissingField {
                path: "Entry.description.value".to_string()
            })
        );
    }
}
