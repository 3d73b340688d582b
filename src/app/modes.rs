//! Input mode state types for the application.
//!
//! These types determine which keybindings are active and how key presses are
//! translated into events by the plugin runtime.
//!
//! # State Machine
//!
//! The input mode is derived from the mounted screen:
//! - **Search**: query input with typing or result browsing focus
//! - **Results**: paginated result list navigation
//! - **Details**: single book view

/// Focus state within the search screen.
///
/// Determines whether the query is being typed or the listed results are being
/// browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    /// User is typing in the query field.
    ///
    /// Accepts character input, backspace, and enter (to submit the query).
    #[default]
    Typing,

    /// User is moving a selection through the listed results.
    ///
    /// Accepts j/k for movement, enter to open a book, and / to return to Typing.
    Browsing,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and the displayed footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Search screen with its focus state.
    Search(SearchFocus),

    /// Results screen.
    ///
    /// Available keybindings: j/k (navigate), m (load more), enter (open),
    /// esc (back), q (quit).
    Results,

    /// Details screen.
    ///
    /// Available keybindings: r (retry cover), esc (back), q (quit).
    Details,
}

impl InputMode {
    /// Returns `true` when printable keys edit the query.
    pub fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_search_typing_captures_text() {
        assert!(InputMode::Search(SearchFocus::Typing).is_typing());
        assert!(!InputMode::Search(SearchFocus::Browsing).is_typing());
        assert!(!InputMode::Results.is_typing());
        assert!(!InputMode::Details.is_typing());
    }
}
