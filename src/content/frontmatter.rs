//! Front-matter parsing

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that accepts any YAML scalar and keeps its string form
fn scalar_to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct AnyScalar;

    impl<'de> Visitor<'de> for AnyScalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a scalar value or nothing")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(AnyScalar)
}

/// Front-matter data from a post or page
///
/// Only `title` and `date` are recognized; any other keys in the metadata
/// block are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_to_string")]
    pub date: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from a document.
    ///
    /// Returns `(front_matter, body)`. A document whose first non-whitespace
    /// characters are `---` is split on that delimiter at most twice: the text
    /// before the first delimiter is discarded, the middle part is parsed as a
    /// YAML mapping, the rest is the body. Malformed or empty metadata yields
    /// empty front-matter, not an error; without a delimiter the whole
    /// document is the body.
    pub fn parse(content: &str) -> (Self, &str) {
        if !content.trim_start().starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let mut parts = content.splitn(3, "---");
        let before = parts.next();
        let meta = parts.next();
        let body = parts.next();

        match (before, meta, body) {
            (Some(_), Some(meta), Some(body)) => {
                if meta.trim().is_empty() {
                    return (FrontMatter::default(), body);
                }
                let fm = serde_yaml::from_str::<FrontMatter>(meta).unwrap_or_else(|e| {
                    tracing::warn!("Malformed front-matter treated as empty: {}", e);
                    FrontMatter::default()
                });
                (fm, body)
            }
            _ => (FrontMatter::default(), content),
        }
    }

    /// Parse the date value as an ISO-8601 calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_iso_date)
    }
}

/// Parse an ISO-8601 calendar date (YYYY-MM-DD); anything else is None
pub(crate) fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    s.trim().parse::<NaiveDate>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: X\ndate: 2025-01-01\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("X".to_string()));
        assert_eq!(fm.date, Some("2025-01-01".to_string()));
        assert_eq!(
            fm.parse_date(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_no_delimiter() {
        let content = "Just some markdown.\n\nNo metadata here.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(fm.date, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_leading_whitespace() {
        let content = "\n\n---\ntitle: A\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("A".to_string()));
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_unclosed_delimiter_is_body() {
        let content = "---\ntitle: X";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_is_empty_metadata() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_empty_metadata_block() {
        let content = "---\n\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_scalar_date_is_stringified() {
        let content = "---\ndate: 20250101\n---\nx";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.date, Some("20250101".to_string()));
        assert_eq!(fm.parse_date(), None);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let content = "---\ntitle: X\ntags:\n  - a\n  - b\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("X".to_string()));
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let fm = FrontMatter {
            date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.parse_date(), None);

        let fm = FrontMatter {
            date: Some("2025-13-40".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.parse_date(), None);
    }
}
