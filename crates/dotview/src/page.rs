//! The viewer page.
//!
//! A [`Page`] ties a location to an [`Orchestrator`]: mounting resolves the
//! location's graph source and hands the result over for rendering. The page
//! can then be written out as a standalone HTML document or as a bare SVG
//! viewport.
//!
//! The HTML document has two stacked panels. The diagram panel is displayed
//! only while the view is [`ViewState::Rendered`]; otherwise the status panel
//! shows the loading or error message.

use log::{debug, info};
use svg::node::{self, element as svg_element};
use url::Url;

use dotview_core::ViewState;

use crate::{
    orchestrator::Orchestrator,
    source::{self, Fetch},
};

const STYLE: &str = "\
html, body { margin: 0; height: 100%; overflow: hidden; }
.App { font-family: sans-serif; text-align: center; }
.Panel { position: absolute; top: 0; left: 0; width: 100%; }
.App-header { min-height: 100%; display: flex; flex-direction: column; align-items: center; justify-content: center; font-size: 1.5em; }";

/// A viewer page bound to a location.
pub struct Page {
    location: Url,
    fetcher: Box<dyn Fetch>,
    orchestrator: Orchestrator,
}

impl Page {
    /// Creates an unmounted page. The view starts out [`ViewState::Empty`].
    pub fn new(location: Url, fetcher: impl Fetch + 'static, orchestrator: Orchestrator) -> Self {
        Self {
            location,
            fetcher: Box::new(fetcher),
            orchestrator,
        }
    }

    /// Returns the page location.
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Returns the current view state.
    pub fn view(&self) -> &ViewState {
        self.orchestrator.state()
    }

    /// Returns the orchestrator driving this page.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Resolves the location's graph source and renders it.
    pub fn mount(&mut self) -> &ViewState {
        info!(location:% = self.location; "Mounting page");
        let resolution = source::resolve(&self.location, self.fetcher.as_ref());
        self.orchestrator.show(resolution);
        self.view()
    }

    /// Points the page at a new location and mounts it again.
    pub fn navigate(&mut self, location: Url) -> &ViewState {
        debug!(from:% = self.location, to:% = location; "Navigating");
        self.location = location;
        self.mount()
    }

    /// Releases everything attached to the rendered diagram.
    pub fn unmount(&mut self) {
        info!("Unmounting page");
        self.orchestrator.unmount();
    }

    /// Renders the diagram viewport as a standalone SVG document.
    ///
    /// While no diagram is mounted, the SVG carries the status message instead.
    pub fn to_svg(&self) -> String {
        self.viewport_document().to_string()
    }

    /// Renders the page as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let view = self.view();
        let (diagram_display, panel_display, diagram) = if view.is_diagram_visible() {
            ("block", "none", format!("{}\n", self.to_svg()))
        } else {
            ("none", "block", String::new())
        };
        let message = node::Text::new(view.panel_message().unwrap_or_default());

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>dotview</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<div class=\"App\">\n\
             <div class=\"Panel\" style=\"height: 100%; display: {diagram_display}\">\n{diagram}</div>\n\
             <div class=\"Panel\" style=\"height: 90%; display: {panel_display}\">\n\
             <header class=\"App-header\"><p>{message}</p></header>\n</div>\n</div>\n</body>\n</html>\n"
        )
    }

    fn viewport_document(&self) -> svg::Document {
        let size = self.orchestrator.pan_zoom_config().viewport_size();
        let (width, height) = (size.width(), size.height());

        let doc = svg::Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("class", "Graph")
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        match (self.orchestrator.container().child(), self.view()) {
            (Some(image), ViewState::Rendered(_)) => {
                let mut viewport = svg_element::Group::new().set("class", "viewport");
                if let Some(transform) = self
                    .orchestrator
                    .controller()
                    .and_then(|controller| controller.transform())
                {
                    viewport = viewport.set("transform", transform.to_matrix());
                }
                doc.add(viewport.add(node::Blob::new(image.root_markup())))
            }
            (_, view) => {
                let message = svg_element::Text::new(view.panel_message().unwrap_or_default())
                    .set("x", width / 2.0)
                    .set("y", height / 2.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif");
                doc.add(message)
            }
        }
    }
}
