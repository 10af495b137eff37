//! Item domain model and the raw record shape consumed by the store.
//!
//! A [`RawRecord`] is whatever a data provider managed to produce: an entry of a
//! `gallery.json` document, or attributes scraped from markup. Every field is
//! optional and several aliases exist per attribute. The normalizer in
//! [`crate::store`] maps records onto the canonical [`Item`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown when an item carries no description.
pub const MISSING_DESCRIPTION: &str = "No description available.";

/// A normalized, immutable media record.
///
/// `id` is non-empty and unique within an [`ItemStore`](crate::store::ItemStore).
/// Visual URLs may be empty: records without them are kept so list positions stay
/// stable for deep-link index arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub thumb_url: String,
    pub full_url: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub collection: String,
}

impl Item {
    /// URL the grid should lazily assign to the thumbnail placeholder.
    #[must_use]
    pub fn thumb_source(&self) -> &str {
        if self.thumb_url.is_empty() {
            &self.full_url
        } else {
            &self.thumb_url
        }
    }

    /// URL the viewer displays, preferring the full-size image.
    #[must_use]
    pub fn display_source(&self) -> &str {
        if self.full_url.is_empty() {
            &self.thumb_url
        } else {
            &self.full_url
        }
    }

    /// Lower-cased text that search terms are matched against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Last path segment of the thumbnail source, e.g. `harbour.jpg`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        let source = self.thumb_source();
        source.rsplit('/').next().unwrap_or(source)
    }

    /// Lower-cased text that site search matches against: title, description,
    /// date and file name.
    #[must_use]
    pub fn site_search_text(&self) -> String {
        format!("{} {} {} {}", self.title, self.description, self.date, self.file_name()).to_lowercase()
    }

    /// Description, or a fixed placeholder when the record had none.
    #[must_use]
    pub fn description_or_placeholder(&self) -> &str {
        if self.description.is_empty() {
            MISSING_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// Caption line shown under the viewer image.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vitrine::Item;
    /// let item = Item {
    ///     id: "a".into(), thumb_url: String::new(), full_url: String::new(),
    ///     title: "A".into(), description: String::new(), date: String::new(),
    ///     collection: "all".into(),
    /// };
    /// assert_eq!(item.caption_date(), "Date: N/A");
    /// ```
    #[must_use]
    pub fn caption_date(&self) -> String {
        if self.date.is_empty() {
            "Date: N/A".to_string()
        } else {
            format!("Date: {}", self.date)
        }
    }

    /// Parses the free-form `date` when it is an ISO calendar date.
    ///
    /// Accepts `YYYY-MM-DD` and `YYYY-MM` (first of the month). Anything else,
    /// such as "Spring 2021", yields `None` and is displayed verbatim.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
            .ok()
    }
}

/// Attributes that scraped markup exposes through `data-*` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordDataset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub collection: Option<String>,
}

/// A heterogeneous record as supplied by a data provider.
///
/// Field aliases follow the data source schema: the normalizer picks the most
/// specific non-empty alias for each attribute. Scalars that are not strings
/// (e.g. a numeric collection tag) are stringified rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumb_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumb_src: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_src: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub collection: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default)]
    pub dataset: Option<RecordDataset>,
}

/// Accepts strings, numbers and booleans; `null` and containers become `None`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(date: &str) -> Item {
        Item {
            id: "x".into(),
            thumb_url: String::new(),
            full_url: "full.jpg".into(),
            title: "Sunset".into(),
            description: String::new(),
            date: date.into(),
            collection: "all".into(),
        }
    }

    #[test]
    fn test_raw_record_accepts_aliases_and_scalars() {
        let json = r#"{"thumbUrl": "t.jpg", "collection": 2021, "dataset": {"desc": "d"}}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.thumb_url.as_deref(), Some("t.jpg"));
        assert_eq!(record.collection.as_deref(), Some("2021"));
        assert_eq!(record.dataset.unwrap().desc.as_deref(), Some("d"));
    }

    #[test]
    fn test_sources_fall_back_to_each_other() {
        let it = item("");
        assert_eq!(it.thumb_source(), "full.jpg");
        assert_eq!(it.display_source(), "full.jpg");
    }

    #[test]
    fn test_caption_and_placeholder() {
        let it = item("2021-06-01");
        assert_eq!(it.caption_date(), "Date: 2021-06-01");
        assert_eq!(it.description_or_placeholder(), MISSING_DESCRIPTION);
    }

    #[test]
    fn test_parsed_date() {
        assert_eq!(item("2021-06-04").parsed_date(), NaiveDate::from_ymd_opt(2021, 6, 4));
        assert_eq!(item("2021-06").parsed_date(), NaiveDate::from_ymd_opt(2021, 6, 1));
        assert!(item("Spring 2021").parsed_date().is_none());
    }
}
