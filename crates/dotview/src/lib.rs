//! dotview - View Graphviz graphs embedded in a URL.
//!
//! A location carries a DOT graph in its fragment (or names a file through its
//! `path` query parameter). dotview resolves the graph, renders it with a
//! layout engine, and places the result in a pan/zoom viewport on a viewer
//! page.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotview::{config::AppConfig, parse_location, Viewer};
//!
//! let location = parse_location("#digraph%20G%20%7B%20A-%3EB%20%7D").unwrap();
//!
//! let mut page = Viewer::new(AppConfig::default()).unwrap().page(location);
//! page.mount();
//!
//! println!("{}", page.to_html());
//! ```

pub mod config;
pub mod engine;
pub mod orchestrator;
pub mod page;
pub mod panzoom;
pub mod source;

mod error;

pub use dotview_core::{Algorithm, VectorImage, ViewState, geometry};

pub use error::DotviewError;
pub use page::Page;

use log::debug;
use url::Url;

use config::AppConfig;
use engine::GraphvizEngine;
use orchestrator::Orchestrator;
use panzoom::ViewportFactory;
use source::UrlFetcher;

/// Base for locations given as a bare `#fragment`.
const BLANK_LOCATION: &str = "about:blank";

/// Parses a page location.
///
/// Accepts any absolute URL, or a bare `#fragment` which is anchored on
/// `about:blank`.
///
/// # Errors
///
/// Returns [`DotviewError::Location`] if the input is not a valid URL.
///
/// # Examples
///
/// ```
/// # use dotview::parse_location;
/// let location = parse_location("#graph%20%7B%7D").unwrap();
/// assert_eq!(location.fragment(), Some("graph%20%7B%7D"));
///
/// assert!(parse_location("not a url").is_err());
/// ```
pub fn parse_location(input: &str) -> Result<Url, DotviewError> {
    let input = input.trim();
    let url = if input.starts_with('#') {
        Url::parse(&format!("{BLANK_LOCATION}{input}"))
    } else {
        Url::parse(input)
    };
    url.map_err(|err| DotviewError::new_location_error(input, err))
}

/// Builds viewer pages wired to the production collaborators: Graphviz for
/// layout, [`panzoom::Viewport`] for pan/zoom and [`UrlFetcher`] for `path=`
/// sources.
pub struct Viewer {
    config: AppConfig,
}

impl Viewer {
    /// Create a new viewer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DotviewError::Config`] if the configuration fails
    /// [`AppConfig::validate`].
    pub fn new(config: AppConfig) -> Result<Self, DotviewError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an unmounted page for `location`.
    pub fn page(&self, location: Url) -> Page {
        debug!(config:? = self.config; "Creating page");
        let orchestrator = Orchestrator::new(&self.config, GraphvizEngine::new, ViewportFactory);
        let fetcher = UrlFetcher::new(self.config.fetch().timeout());
        Page::new(location, fetcher, orchestrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_fragment_is_anchored() {
        let location = parse_location("#digraph%7B%7D").unwrap();
        assert_eq!(location.scheme(), "about");
        assert_eq!(location.fragment(), Some("digraph%7B%7D"));
    }

    #[test]
    fn test_viewer_rejects_nan_zoom_bounds() {
        let config: AppConfig = toml::from_str("[pan_zoom]\nmin_zoom = nan\n").unwrap();
        assert!(matches!(Viewer::new(config), Err(DotviewError::Config(_))));
    }

    #[test]
    fn test_viewer_accepts_default_config() {
        assert!(Viewer::new(AppConfig::default()).is_ok());
    }
}
