//! Keyboard focus handles and the viewer's focus trap.
//!
//! While the viewer is open, Tab and Shift+Tab cycle within its interactive
//! controls. The trap only intervenes at the edges (or when focus has escaped
//! the controls); elsewhere the host's native tab order applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a focusable element owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusTarget(String);

impl FocusTarget {
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default viewer controls in tab order.
#[must_use]
pub fn default_controls() -> Vec<FocusTarget> {
    ["viewer-close", "viewer-prev", "viewer-next"]
        .into_iter()
        .map(FocusTarget::new)
        .collect()
}

/// Focus containment over an ordered set of controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    controls: Vec<FocusTarget>,
}

impl FocusTrap {
    #[must_use]
    pub fn new(controls: Vec<FocusTarget>) -> Self {
        Self { controls }
    }

    /// The control that receives focus when the trap is installed.
    #[must_use]
    pub fn first(&self) -> Option<&FocusTarget> {
        self.controls.first()
    }

    /// Decides where a Tab press should land.
    ///
    /// Returns `Some(target)` when the trap redirects focus, `None` to let the
    /// host's native tab order proceed.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine::viewer::focus::{default_controls, FocusTarget, FocusTrap};
    ///
    /// let trap = FocusTrap::new(default_controls());
    /// let last = FocusTarget::new("viewer-next");
    /// assert_eq!(trap.on_tab(Some(&last), false), Some(FocusTarget::new("viewer-close")));
    /// ```
    #[must_use]
    pub fn on_tab(&self, current: Option<&FocusTarget>, shift: bool) -> Option<FocusTarget> {
        let (first, last) = (self.controls.first()?, self.controls.last()?);

        let Some(position) = current.and_then(|c| self.controls.iter().position(|t| t == c)) else {
            // Focus is outside the viewer: pull it back in.
            return Some(if shift { last.clone() } else { first.clone() });
        };

        match (shift, position) {
            (false, p) if p == self.controls.len() - 1 => Some(first.clone()),
            (true, 0) => Some(last.clone()),
            _ => None,
        }
    }
}
