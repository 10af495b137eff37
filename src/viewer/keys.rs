//! Keyboard input as seen by the gallery core.

/// A key press, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Tab { shift: bool },
    Other(String),
}

impl Key {
    /// Maps a DOM key name plus the Shift modifier onto a [`Key`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine::viewer::Key;
    ///
    /// assert_eq!(Key::from_dom("Tab", true), Key::Tab { shift: true });
    /// assert_eq!(Key::from_dom("Esc", false), Key::Escape);
    /// ```
    #[must_use]
    pub fn from_dom(name: &str, shift: bool) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab { shift },
            other => Self::Other(other.to_string()),
        }
    }
}
