//! What the viewer page currently shows.

use crate::image::VectorImage;

/// Placeholder text shown while nothing has resolved yet.
pub const LOADING_MESSAGE: &str = "Loading...";

/// The page's view model.
///
/// Exactly one variant is active at a time, so a page can never hold both a
/// rendered diagram and an error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing resolved yet; the loading panel is shown.
    #[default]
    Empty,
    /// A validated diagram is mounted and visible.
    Rendered(VectorImage),
    /// Rendering did not happen; the message is shown to the user.
    Error(String),
}

impl ViewState {
    /// Whether the diagram container should be visible.
    pub fn is_diagram_visible(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// Returns the error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Text for the status panel shown while the diagram is hidden.
    pub fn panel_message(&self) -> Option<&str> {
        match self {
            Self::Empty => Some(LOADING_MESSAGE),
            Self::Rendered(_) => None,
            Self::Error(message) => Some(message),
        }
    }

    /// Short name of the active variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Rendered(_) => "rendered",
            Self::Error(_) => "error",
        }
    }
}
