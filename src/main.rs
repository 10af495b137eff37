//! Terminal host and entry point.
//!
//! A thin integration layer between the vitrine library and a terminal. It
//! plays the part a browser page plays for the gallery: it loads data through
//! the providers, translates typed commands into library events, executes the
//! returned actions and prints the rendered frame.
//!
//! # Lifecycle
//!
//! 1. **Start**: Parse `key=value` arguments (or `config=<file.toml>`),
//!    initialize tracing, create the gallery
//! 2. **Load**: JSON document first, scanned markup as fallback
//! 3. **Loop**: Read one command per line from stdin, handle it, re-render
//! 4. **Exit**: Append the session span log to `trace_file` if configured
//!
//! # Commands
//!
//! - `filter <tag>`, `search [text]`, `site [text]`: filters and searches
//! - `focus grid|site`, `blur`: search input focus
//! - `more`, `scroll <top> [height]`: pagination and lazy loading
//! - `open <id>`, `slide <group> <id>`: open the viewer
//! - `next`, `prev`, `close`, `backdrop`: viewer controls
//! - `key <name> [shift]`: a key press, e.g. `key ArrowLeft` or `key Tab shift`
//! - `hash <fragment>`: simulate a location fragment change
//! - `step <group> <delta>`: move a carousel
//! - `quit`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use vitrine::app::SearchScope;
use vitrine::bus::GroupId;
use vitrine::lazy::Viewport;
use vitrine::observability::{init_tracing, SpanLog};
use vitrine::source::{load_with_fallback, DataProvider, JsonDocumentProvider, MarkupScanProvider};
use vitrine::viewer::{FocusTarget, Key};
use vitrine::{handle_event, Action, Config, Event, Gallery};

const TERMINAL_COLUMNS: usize = 100;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// One parsed line of input.
#[derive(Debug, PartialEq)]
enum Command {
    Event(Event),
    Help,
    Quit,
}

/// Host state wrapped around the library's [`Gallery`].
struct Host {
    gallery: Gallery,
    config: Config,
    log: SpanLog,
    /// The simulated location fragment.
    location: Option<String>,
    /// Element the host last moved focus to.
    focused: Option<FocusTarget>,
}

impl Host {
    fn new(config: Config, log: SpanLog) -> Self {
        Self {
            gallery: vitrine::initialize(&config),
            config,
            log,
            location: None,
            focused: None,
        }
    }

    /// Loads records through the provider chain and hands them to the gallery.
    fn load(&mut self) {
        let _span = tracing::debug_span!("host_load").entered();

        let json = JsonDocumentProvider::new(self.config.data_path.as_str());
        let markup = self.config.markup_path.as_deref().map(MarkupScanProvider::new);

        let mut providers: Vec<&dyn DataProvider> = vec![&json];
        if let Some(markup) = &markup {
            providers.push(markup);
        }

        let ticket = self.gallery.begin_load();
        let records = load_with_fallback(&providers);
        self.dispatch(&Event::DataLoaded { ticket, records });
    }

    /// Handles an event and executes the resulting actions.
    ///
    /// Returns whether the frame should be re-rendered.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.gallery, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Executes an action against the terminal.
    ///
    /// Grid and viewer contents are re-derived from the view model on every
    /// render, so only focus and location need host-side bookkeeping.
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::FocusElement(target) => {
                tracing::trace!(target = %target, "moving focus");
                self.focused = Some(target.clone());
            }
            Action::ReplaceFragment(fragment) => {
                tracing::debug!(fragment = ?fragment, "replacing location fragment");
                self.location.clone_from(fragment);
            }
            Action::Prefetch { url } => tracing::trace!(url = %url, "prefetching neighbour"),
            Action::AssignSource { thumb, url } => tracing::trace!(thumb = %thumb, url = %url, "assigning source"),
            Action::ScrollToItem { id } => tracing::debug!(id = %id, "scrolling to item"),
            Action::ClearGrid
            | Action::RenderThumb { .. }
            | Action::ShowItem { .. }
            | Action::HideViewer
            | Action::SyncFilterControls { .. }
            | Action::SyncSiteSearch { .. } => {}
        }
    }

    fn render(&self) {
        let frame = vitrine::ui::render(&self.gallery, TERMINAL_COLUMNS, self.config.grid_columns);
        println!("{frame}");
        if let Some(location) = &self.location {
            println!("location: {location}");
        }
    }

    /// Appends the span log to the configured trace file.
    fn flush_traces(&self) {
        let Some(path) = &self.config.trace_file else {
            return;
        };
        match self.log.write_to(Path::new(path)) {
            Ok(written) => tracing::debug!(written, path = %path, "span log written"),
            Err(e) => eprintln!("failed to write span log to {path}: {e}"),
        }
    }
}

/// Parses one input line; `None` for blank or unrecognized input.
fn parse_command(line: &str, focused: Option<&FocusTarget>) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let rest: Vec<&str> = words.collect();
    let text = rest.join(" ");

    let event = match (verb, rest.as_slice()) {
        ("quit" | "q", _) => return Some(Command::Quit),
        ("help" | "?", _) => return Some(Command::Help),
        ("filter", [tag]) => Event::SelectCategory((*tag).to_string()),
        ("search", _) => Event::QueryChanged(text),
        ("site", _) => Event::SiteQueryChanged(text),
        ("focus", ["grid"]) => Event::FocusSearch(SearchScope::Grid),
        ("focus", ["site"]) => Event::FocusSearch(SearchScope::Site),
        ("blur", []) => Event::BlurSearch,
        ("more", []) => Event::LoadMore,
        ("scroll", [top]) => Event::ViewportChanged(Viewport::new(top.parse().ok()?, DEFAULT_VIEWPORT_HEIGHT)),
        ("scroll", [top, height]) => Event::ViewportChanged(Viewport::new(top.parse().ok()?, height.parse().ok()?)),
        ("open", [id]) => Event::OpenItem {
            id: (*id).to_string(),
            focused: focused.cloned(),
        },
        ("slide", [group, id]) => Event::OpenFromCarousel {
            group: GroupId::new(*group),
            id: (*id).to_string(),
            focused: focused.cloned(),
        },
        ("next", []) => Event::Next,
        ("prev", []) => Event::Prev,
        ("close", []) => Event::Close,
        ("backdrop", []) => Event::BackdropClicked,
        ("key", [name]) => Event::Key {
            key: Key::from_dom(name, false),
            focused: focused.cloned(),
        },
        ("key", [name, "shift"]) => Event::Key {
            key: Key::from_dom(name, true),
            focused: focused.cloned(),
        },
        ("hash", _) => Event::FragmentChanged(text),
        ("step", [group, delta]) => Event::CarouselStep {
            group: GroupId::new(*group),
            delta: delta.parse().ok()?,
        },
        _ => return None,
    };
    Some(Command::Event(event))
}

fn load_config(args: &BTreeMap<String, String>) -> Config {
    let Some(path) = args.get("config") else {
        return Config::from_map(args);
    };
    Config::from_toml_file(path).unwrap_or_else(|e| {
        eprintln!("{e}; falling back to command line settings");
        Config::from_map(args)
    })
}

fn main() {
    let args: BTreeMap<String, String> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
        })
        .collect();

    let config = load_config(&args);
    let log = init_tracing(&config);

    let mut host = Host::new(config, log);
    {
        let _span = tracing::debug_span!("host_start").entered();
        host.load();
        if let Some(fragment) = args.get("hash") {
            host.dispatch(&Event::FragmentChanged(fragment.clone()));
        }
    }
    host.render();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match parse_command(&line, host.focused.as_ref()) {
            Some(Command::Quit) => break,
            Some(Command::Help) => println!("{}", host.gallery.compute_viewmodel().footer.keybindings),
            Some(Command::Event(event)) => {
                if host.dispatch(&event) {
                    host.render();
                }
            }
            None => println!("unrecognized command: {line}"),
        }
        let _ = io::stdout().flush();
    }

    host.flush_traces();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewer_commands() {
        assert_eq!(parse_command("next", None), Some(Command::Event(Event::Next)));
        assert_eq!(parse_command("quit", None), Some(Command::Quit));
        assert_eq!(
            parse_command("key Tab shift", None),
            Some(Command::Event(Event::Key {
                key: Key::Tab { shift: true },
                focused: None
            }))
        );
    }

    #[test]
    fn test_parse_open_carries_focus() {
        let focused = FocusTarget::new("thumb-3");
        assert_eq!(
            parse_command("open dusk", Some(&focused)),
            Some(Command::Event(Event::OpenItem {
                id: "dusk".to_string(),
                focused: Some(focused.clone()),
            }))
        );
    }

    #[test]
    fn test_parse_multi_word_search() {
        assert_eq!(
            parse_command("search sun set", None),
            Some(Command::Event(Event::QueryChanged("sun set".to_string())))
        );
        assert_eq!(parse_command("search", None), Some(Command::Event(Event::QueryChanged(String::new()))));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_command("", None), None);
        assert_eq!(parse_command("step sky many", None), None);
        assert_eq!(parse_command("scroll up", None), None);
        assert_eq!(parse_command("dance", None), None);
    }
}
