//! Raw record normalization and deterministic identifier derivation.
//!
//! Maps heterogeneous [`RawRecord`]s onto canonical [`Item`]s. Identifiers are
//! derived without randomness so reloading the same data yields the same ids:
//!
//! 1. explicit `id` / `slug`
//! 2. slug of the title
//! 3. `art-NNN` from the 1-based record position
//!
//! Collisions are resolved by suffixing `-2`, `-3`, … in store order.

use crate::domain::{Item, RawRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Collection tag assigned to records that do not name one.
pub const DEFAULT_COLLECTION: &str = "all";

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD_RE: Regex = Regex::new(r"[^A-Za-z0-9_-]+").unwrap();
    static ref DASH_RUN_RE: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Turns a title into a URL-friendly identifier.
///
/// Lower-cases, maps whitespace runs to `-`, strips non-word characters,
/// collapses dash runs and trims dashes from both ends. May return an empty
/// string when the title has no word characters.
///
/// # Examples
///
/// ```
/// use vitrine::store::slugify;
///
/// assert_eq!(slugify("  Sunset Over  Hills! "), "sunset-over-hills");
/// assert_eq!(slugify("???"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    let stripped = NON_WORD_RE.replace_all(&dashed, "");
    let collapsed = DASH_RUN_RE.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Returns the first alias that is present and non-empty.
fn pick<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

/// Maps a single record onto an [`Item`] without an identifier.
///
/// The returned item's `id` holds the preferred explicit id (possibly empty);
/// [`normalize`] settles the final value.
fn map_record(record: &RawRecord) -> Item {
    let dataset = record.dataset.clone().unwrap_or_default();

    let thumb = pick(&[
        record.thumb.as_deref(),
        record.thumb_url.as_deref(),
        record.thumb_src.as_deref(),
        record.src.as_deref(),
    ]);
    let full = pick(&[
        record.full.as_deref(),
        record.full_url.as_deref(),
        record.full_src.as_deref(),
        dataset.full.as_deref(),
        record.src.as_deref(),
    ]);
    let trimmed_title = record.title.as_deref().map(str::trim);
    let title = pick(&[trimmed_title, record.name.as_deref(), record.alt.as_deref()]);
    let description = pick(&[
        record.desc.as_deref(),
        record.description.as_deref(),
        dataset.desc.as_deref(),
    ]);
    let date = pick(&[record.date.as_deref(), dataset.date.as_deref()]);
    let collection = pick(&[record.collection.as_deref(), dataset.collection.as_deref()])
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COLLECTION);
    let explicit_id = pick(&[
        record.id.as_deref().map(str::trim),
        record.slug.as_deref().map(str::trim),
    ]);

    Item {
        id: explicit_id.unwrap_or_default().to_string(),
        thumb_url: thumb.unwrap_or_default().to_string(),
        full_url: full.unwrap_or_default().to_string(),
        title: title.unwrap_or_default().to_string(),
        description: description.unwrap_or_default().to_string(),
        date: date.unwrap_or_default().to_string(),
        collection: collection.to_string(),
    }
}

/// Normalizes records into items with non-empty, unique, deterministic ids.
///
/// Records missing visual URLs still produce an item so the output length
/// always equals the input length.
#[must_use]
pub fn normalize(records: &[RawRecord]) -> Vec<Item> {
    let _span = tracing::debug_span!("normalize", records = records.len()).entered();

    let mut taken: HashSet<String> = HashSet::with_capacity(records.len());
    let mut collisions = 0usize;

    let items: Vec<Item> = records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let mut item = map_record(record);

            let base = if item.id.is_empty() {
                let slug = slugify(&item.title);
                if slug.is_empty() {
                    format!("art-{:03}", position + 1)
                } else {
                    slug
                }
            } else {
                item.id.clone()
            };

            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}-{suffix}");
                suffix += 1;
            }
            if candidate != base {
                collisions += 1;
                tracing::trace!(base = %base, id = %candidate, "identifier collision resolved");
            }

            taken.insert(candidate.clone());
            item.id = candidate;
            item
        })
        .collect();

    tracing::debug!(items = items.len(), collisions, "records normalized");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> RawRecord {
        RawRecord {
            title: Some(title.to_string()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_slugify_rules() {
        assert_eq!(slugify("Sunset Over Hills"), "sunset-over-hills");
        assert_eq!(slugify("--Hello,   World--"), "hello-world");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_field_precedence() {
        let raw = RawRecord {
            src: Some("src.jpg".into()),
            full_url: Some("full.jpg".into()),
            thumb: Some(String::new()),
            name: Some("Named".into()),
            description: Some("desc".into()),
            ..RawRecord::default()
        };
        let items = normalize(&[raw]);
        assert_eq!(items[0].thumb_url, "src.jpg");
        assert_eq!(items[0].full_url, "full.jpg");
        assert_eq!(items[0].title, "Named");
        assert_eq!(items[0].description, "desc");
        assert_eq!(items[0].collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_title_is_trimmed_and_blank_title_falls_through() {
        let raw = RawRecord {
            title: Some("   ".into()),
            alt: Some("Alt text".into()),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&[raw])[0].title, "Alt text");
    }

    #[test]
    fn test_ids_are_derived_unique_and_deterministic() {
        let records = vec![
            record("Sunset"),
            record("Sunset"),
            record(""),
            RawRecord { id: Some("sunset-2".into()), ..RawRecord::default() },
        ];
        let first = normalize(&records);
        let ids: Vec<&str> = first.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["sunset", "sunset-2", "art-003", "sunset-2-2"]);

        let second = normalize(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_urls_keep_the_record() {
        let items = normalize(&[RawRecord::default(), RawRecord::default()]);
        assert_eq!(items.len(), 2);
        assert!(items[0].thumb_url.is_empty());
        assert_eq!(items[0].id, "art-001");
        assert_eq!(items[1].id, "art-002");
    }

    #[test]
    fn test_dataset_fields_are_honoured() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"src": "a.jpg", "alt": "A", "dataset": {"full": "a-big.jpg", "collection": "murals", "date": "2020"}}"#,
        )
        .unwrap();
        let item = &normalize(&[raw])[0];
        assert_eq!(item.full_url, "a-big.jpg");
        assert_eq!(item.collection, "murals");
        assert_eq!(item.date, "2020");
    }
}
