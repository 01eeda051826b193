use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored page. Owned by the page store; everything else gets clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub content: String,
    /// Set on every write
    #[serde(with = "minute_timestamp")]
    pub updated: DateTime<Utc>,
    /// Bumped on every write. Pending evictions are tied to one revision.
    pub revision: u64,
}

/// List view of a page - no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
    #[serde(with = "minute_timestamp")]
    pub updated: DateTime<Utc>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.title.clone(),
            updated: page.updated,
        }
    }
}

/// `updated` goes over the wire as "YYYY-MM-DD HH:MM" in UTC.
mod minute_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// What the writer gets back from a save. Deliberately says nothing about the
/// moderation verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub slug: String,
    pub revision: u64,
}

/// Derive a URL-safe slug from a title: lowercase, every run of characters
/// outside `[a-z0-9]` collapses to a single `-`, and leading/trailing dashes
/// are trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust -- Tips & Tricks!  "), "rust-tips-tricks");
        assert_eq!(slugify("Page 42"), "page-42");
        assert_eq!(slugify("Crème brûlée"), "cr-me-br-l-e");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_updated_serialized_to_the_minute() {
        let updated = NaiveDateTime::parse_from_str("2024-03-09 14:05:59", "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc();
        let page = Page {
            slug: "home".to_string(),
            title: "Home".to_string(),
            content: String::new(),
            updated,
            revision: 1,
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["updated"], "2024-03-09 14:05");

        let summary = serde_json::to_value(PageSummary::from(&page)).unwrap();
        assert_eq!(summary["updated"], "2024-03-09 14:05");

        // Seconds are dropped on the way back in
        let parsed: Page = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.updated.format("%H:%M:%S").to_string(), "14:05:00");
    }
}
