//! Markup-scan fallback provider.
//!
//! Recovers records from an HTML page whose carousels already embed the
//! artwork: every `<img>` nested in a `carousel-track` element becomes one
//! record. The enclosing `carousel-wrapper`'s `data-section` names the
//! collection.
//!
//! This is a tag scanner, not an HTML parser: it tracks the open-element stack
//! well enough for the flat, regular markup such pages use.

use crate::domain::{GalleryError, RawRecord, Result};
use crate::source::DataProvider;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

lazy_static! {
    static ref TAG_RE: Regex =
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>'\x22]|'[^']*'|\x22[^\x22]*\x22)*)>").unwrap();
    static ref ATTR_RE: Regex =
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap();
}

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input", "source", "area", "wbr"];

/// An open element on the scan stack.
#[derive(Debug)]
struct OpenElement {
    name: String,
    attrs: HashMap<String, String>,
}

impl OpenElement {
    fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or_else(String::new, |m| decode_entities(m.as_str()));
            Some((name, value))
        })
        .collect()
}

/// Builds a record from an `<img>` inside a carousel track.
fn record_from_image(attrs: &HashMap<String, String>, stack: &[OpenElement]) -> RawRecord {
    let attr = |name: &str| attrs.get(name).filter(|v| !v.is_empty()).cloned();

    let section = stack
        .iter()
        .rev()
        .find(|el| el.has_class("carousel-wrapper"))
        .and_then(|el| el.attrs.get("data-section").cloned())
        .filter(|s| !s.is_empty());

    RawRecord {
        thumb: attr("data-thumb").or_else(|| attr("src")),
        full: attr("data-full").or_else(|| attr("src")),
        title: attr("alt").or_else(|| attr("title")),
        desc: attr("data-desc"),
        date: attr("data-date"),
        collection: section.or_else(|| attr("data-collection")),
        id: attr("data-id").or_else(|| attr("id")),
        ..RawRecord::default()
    }
}

/// Scans carousel images out of an HTML document.
///
/// # Examples
///
/// ```
/// use vitrine::source::MarkupScanProvider;
///
/// let html = r#"<div class="carousel-wrapper" data-section="murals">
///   <div class="carousel-track"><img src="a.jpg" alt="Wall" data-desc="Big"></div>
/// </div>"#;
/// let records = MarkupScanProvider::scan(html);
/// assert_eq!(records[0].collection.as_deref(), Some("murals"));
/// ```
#[must_use]
pub fn scan(html: &str) -> Vec<RawRecord> {
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut records = Vec::new();

    for caps in TAG_RE.captures_iter(html) {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_lowercase();
        let rest = caps.get(3).map_or("", |m| m.as_str());

        if closing {
            if let Some(pos) = stack.iter().rposition(|el| el.name == name) {
                stack.truncate(pos);
            }
            continue;
        }

        let attrs = parse_attributes(rest.trim_end_matches('/'));

        if name == "img" {
            if stack.iter().any(|el| el.has_class("carousel-track")) {
                records.push(record_from_image(&attrs, &stack));
            }
            continue;
        }

        if VOID_ELEMENTS.contains(&name.as_str()) || rest.trim_end().ends_with('/') {
            continue;
        }

        stack.push(OpenElement { name, attrs });
    }

    tracing::debug!(records = records.len(), "markup scanned");
    records
}

/// Reads an HTML page from disk and scans it for carousel images.
#[derive(Debug, Clone)]
pub struct MarkupScanProvider {
    path: PathBuf,
}

impl MarkupScanProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Scans an in-memory document.
    #[must_use]
    pub fn scan(html: &str) -> Vec<RawRecord> {
        scan(html)
    }
}

impl DataProvider for MarkupScanProvider {
    fn name(&self) -> &str {
        "markup-scan"
    }

    fn fetch(&self) -> Result<Vec<RawRecord>> {
        if !self.path.exists() {
            return Err(GalleryError::DataUnavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }
        let html = std::fs::read_to_string(&self.path)?;
        Ok(scan(&html))
    }
}
