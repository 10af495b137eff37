//! View model types representing renderable gallery state.
//!
//! View models are computed by [`Gallery::compute_viewmodel`](crate::app::Gallery::compute_viewmodel)
//! and consumed by the renderer. They carry display-ready strings and flags
//! only; no rendering decision depends on gallery internals.

use crate::app::InputFocus;
use crate::carousel::{CarouselWidget, SlideState};
use crate::domain::Item;
use crate::filter::Query;
use crate::viewer::ViewerCaption;

/// Label of the pagination control while more items remain.
pub const LOAD_MORE_LABEL: &str = "Load more";

/// Label of the pagination control once everything is revealed.
pub const NO_MORE_LABEL: &str = "No more items";

/// Complete view model for one render.
#[derive(Debug, Clone)]
pub struct GalleryViewModel {
    pub header: HeaderInfo,

    /// Category buttons, `all` first.
    pub filters: Vec<FilterChip>,

    /// Grid search input and its result counter.
    pub search_bar: SearchBarInfo,

    /// Revealed grid thumbnails in order.
    pub thumbs: Vec<ThumbCard>,

    pub load_more: LoadMoreInfo,

    /// Site search input over the carousels.
    pub site_search: SearchBarInfo,

    pub carousels: Vec<CarouselRow>,

    /// Present while the viewer is open.
    pub viewer: Option<ViewerPanel>,

    /// Shown instead of the grid when nothing matches.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// Title line with reveal counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// e.g. `"24 of 60 shown (80 total)"`.
    pub counts: String,
}

impl HeaderInfo {
    #[must_use]
    pub fn new(revealed: usize, filtered: usize, total: usize) -> Self {
        let counts = if filtered == total {
            format!("{revealed} of {filtered} shown")
        } else {
            format!("{revealed} of {filtered} shown ({total} total)")
        };
        Self {
            title: "Gallery".to_string(),
            counts,
        }
    }
}

/// One category button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub active: bool,
}

/// A search input as the renderer shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// `""`, `"No results"`, `"1 result"` or `"N results"`.
    pub stats: String,
    pub focused: bool,
}

/// One revealed grid thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbCard {
    pub id: String,
    pub title: String,
    pub collection: String,
    /// ISO `YYYY-MM-DD` form of the item date for a `<time datetime>`
    /// attribute; `None` when the date is free-form or missing.
    pub datetime: Option<String>,
    /// Whether the image source has been assigned yet.
    pub loaded: bool,
    /// Character ranges of `title` matching query terms, sorted and disjoint.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl ThumbCard {
    #[must_use]
    pub fn new(item: &Item, loaded: bool, query: &Query) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            collection: item.collection.clone(),
            datetime: item.parsed_date().map(|date| date.format("%Y-%m-%d").to_string()),
            loaded,
            highlight_ranges: highlight_ranges(&item.title, query),
        }
    }
}

/// Finds every occurrence of every query term in `text`, as merged char ranges.
fn highlight_ranges(text: &str, query: &Query) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }

    let lower: Vec<char> = text.to_lowercase().chars().collect();
    // Lower-casing may change the char count; ranges would be meaningless then.
    if lower.len() != text.chars().count() {
        return Vec::new();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in query.terms() {
        let needle: Vec<char> = term.chars().collect();
        if needle.is_empty() || needle.len() > lower.len() {
            continue;
        }
        for start in 0..=lower.len() - needle.len() {
            if lower[start..start + needle.len()] == needle[..] {
                ranges.push((start, start + needle.len()));
            }
        }
    }

    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// The pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    pub label: String,
    pub enabled: bool,
}

impl LoadMoreInfo {
    #[must_use]
    pub fn new(has_more: bool) -> Self {
        Self {
            label: if has_more { LOAD_MORE_LABEL } else { NO_MORE_LABEL }.to_string(),
            enabled: has_more,
        }
    }
}

/// One carousel as laid out by its widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselRow {
    pub group: String,
    pub slides: Vec<SlideState>,
    pub left_disabled: bool,
    pub right_disabled: bool,
}

impl CarouselRow {
    #[must_use]
    pub fn from_widget(widget: &CarouselWidget) -> Self {
        let (left_disabled, right_disabled) = widget.edges_disabled();
        Self {
            group: widget.group().to_string(),
            slides: widget.slides(),
            left_disabled,
            right_disabled,
        }
    }
}

/// The open viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerPanel {
    pub caption: ViewerCaption,
    /// 1-based `"3 / 10"`.
    pub position: String,
}

impl ViewerPanel {
    #[must_use]
    pub fn new(caption: ViewerCaption, index: usize, len: usize) -> Self {
        Self {
            caption,
            position: format!("{} / {len}", index + 1),
        }
    }
}

/// Message shown when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Key hints for the bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

impl FooterInfo {
    #[must_use]
    pub fn for_state(viewer_open: bool, focus: InputFocus) -> Self {
        let keybindings = if viewer_open {
            "←/→: navigate | tab: cycle controls | esc: close"
        } else if focus.is_searching() {
            "enter: open first result | esc: clear search"
        } else {
            "more: load more | open <id>: view | filter <tag> | search <text> | quit"
        };
        Self {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_more_labels() {
        assert_eq!(LoadMoreInfo::new(true).label, "Load more");
        let done = LoadMoreInfo::new(false);
        assert_eq!(done.label, "No more items");
        assert!(!done.enabled);
    }

    #[test]
    fn test_highlight_ranges_merge_overlaps() {
        let ranges = highlight_ranges("Sunset Sun", &Query::parse("sun uns"));
        assert_eq!(ranges, vec![(0, 4), (7, 10)]);
    }

    #[test]
    fn test_highlight_ranges_empty_query() {
        assert!(highlight_ranges("Anything", &Query::default()).is_empty());
    }

    #[test]
    fn test_thumb_card_datetime_only_for_calendar_dates() {
        let mut item = Item {
            id: "dunes".into(),
            thumb_url: String::new(),
            full_url: String::new(),
            title: "Dunes".into(),
            description: String::new(),
            date: "2021-06".into(),
            collection: "all".into(),
        };
        let card = ThumbCard::new(&item, false, &Query::default());
        assert_eq!(card.datetime.as_deref(), Some("2021-06-01"));

        item.date = "Spring 2021".into();
        assert_eq!(ThumbCard::new(&item, false, &Query::default()).datetime, None);
    }

    #[test]
    fn test_header_counts() {
        assert_eq!(HeaderInfo::new(24, 60, 60).counts, "24 of 60 shown");
        assert_eq!(HeaderInfo::new(3, 3, 10).counts, "3 of 3 shown (10 total)");
    }

    #[test]
    fn test_viewer_position_is_one_based() {
        let caption = ViewerCaption {
            title: "T".into(),
            description: "No description available.".into(),
            date_line: "Date: N/A".into(),
            image_url: String::new(),
        };
        assert_eq!(ViewerPanel::new(caption, 2, 10).position, "3 / 10");
    }
}
