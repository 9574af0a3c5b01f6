//! Render orchestration.
//!
//! The [`Orchestrator`] turns resolution results into [`ViewState`]
//! transitions. It owns the layout engine (replacing it after a failure), the
//! diagram container the rendered image is mounted in, and the single live
//! pan/zoom controller.
//!
//! Render requests are numbered with [`RenderTicket`]s. Only the most recently
//! issued ticket may change the view; results for older tickets are dropped.

use log::{debug, info, warn};
use thiserror::Error;

use dotview_core::{InvalidImage, VectorImage, ViewState};

use crate::{
    config::AppConfig,
    engine::{AlgorithmPolicy, EngineError, EngineFactory, LayoutEngine},
    panzoom::{PanZoom, PanZoomConfig, PanZoomFactory},
    source::{GraphSource, ResolveError},
};

/// Shown when the location carries no graph.
pub const NO_SOURCE_MESSAGE: &str = "No graph source found in URL";

/// Shown when the location fragment cannot be decoded.
pub const MALFORMED_SOURCE_MESSAGE: &str = "Graph source in URL is not valid UTF-8";

/// Shown for any rendering failure.
pub const RENDER_FAILURE_MESSAGE: &str = "Graph could not be rendered";

/// Why a render attempt did not produce a diagram.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Invalid(#[from] InvalidImage),
}

/// Identifies one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// The element the rendered image is mounted into.
#[derive(Debug, Default)]
pub struct DiagramContainer {
    child: Option<VectorImage>,
}

impl DiagramContainer {
    /// Returns the mounted image, if any.
    pub fn child(&self) -> Option<&VectorImage> {
        self.child.as_ref()
    }

    fn clear(&mut self) {
        self.child = None;
    }

    fn append(&mut self, image: VectorImage) {
        self.child = Some(image);
    }
}

/// Owns the view state and everything attached to it.
pub struct Orchestrator {
    factory: Box<dyn EngineFactory>,
    engine: Box<dyn LayoutEngine>,
    pan_zoom_factory: Box<dyn PanZoomFactory>,
    controller: Option<Box<dyn PanZoom>>,
    container: DiagramContainer,
    state: ViewState,
    policy: AlgorithmPolicy,
    pan_zoom_config: PanZoomConfig,
    initial_zoom: f32,
    latest: RenderTicket,
}

impl Orchestrator {
    /// Creates an orchestrator in the [`ViewState::Empty`] state.
    ///
    /// # Arguments
    ///
    /// * `config` - Algorithm policy, initial zoom and pan/zoom settings
    /// * `factory` - Source of layout engine instances
    /// * `pan_zoom_factory` - Attaches controllers to mounted images
    pub fn new(
        config: &AppConfig,
        factory: impl EngineFactory + 'static,
        pan_zoom_factory: impl PanZoomFactory + 'static,
    ) -> Self {
        let engine = factory.create();
        Self {
            factory: Box::new(factory),
            engine,
            pan_zoom_factory: Box::new(pan_zoom_factory),
            controller: None,
            container: DiagramContainer::default(),
            state: ViewState::Empty,
            policy: config.render().policy().clone(),
            pan_zoom_config: config.pan_zoom().clone(),
            initial_zoom: config.render().initial_zoom(),
            latest: RenderTicket(0),
        }
    }

    /// Returns the current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the diagram container.
    pub fn container(&self) -> &DiagramContainer {
        &self.container
    }

    /// Returns the live pan/zoom controller, if any.
    pub fn controller(&self) -> Option<&dyn PanZoom> {
        self.controller.as_deref()
    }

    /// Returns the pan/zoom settings controllers are attached with.
    pub fn pan_zoom_config(&self) -> &PanZoomConfig {
        &self.pan_zoom_config
    }

    /// Handles one resolution result end to end.
    pub fn show(&mut self, resolution: Result<GraphSource, ResolveError>) {
        let ticket = self.begin();
        let outcome = match resolution {
            Ok(source) => Ok(self.render(source)),
            Err(err) => Err(err),
        };
        self.complete(ticket, outcome);
    }

    /// Issues a ticket for a new request, superseding all earlier ones.
    pub fn begin(&mut self) -> RenderTicket {
        self.latest = RenderTicket(self.latest.0 + 1);
        debug!(ticket = self.latest.0; "Render requested");
        self.latest
    }

    /// Renders and validates `source` without touching the view.
    ///
    /// After any failure, including an error-shaped document, the engine is
    /// replaced so the next attempt starts from a fresh instance.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Engine`] if the engine failed and
    /// [`RenderError::Invalid`] if it returned an error-shaped document.
    pub fn render(&mut self, source: GraphSource) -> Result<VectorImage, RenderError> {
        let text = source.into_text();
        let algorithm = self.policy.select(&text);
        info!(algorithm:% = algorithm, bytes = text.len(); "Rendering graph");

        let image = match self.engine.render(&text, algorithm) {
            Ok(image) => image,
            Err(err) => {
                warn!(err:%; "Layout engine failed, replacing it");
                self.replace_engine();
                return Err(err.into());
            }
        };

        if let Err(err) = image.validate() {
            warn!(err:%; "Layout engine returned an invalid document, replacing it");
            self.replace_engine();
            return Err(err.into());
        }
        Ok(image)
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the view untouched if a newer request has
    /// been issued since.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        outcome: Result<Result<VectorImage, RenderError>, ResolveError>,
    ) -> bool {
        if ticket != self.latest {
            debug!(ticket = ticket.0, latest = self.latest.0; "Discarding superseded render");
            return false;
        }

        let next = match outcome {
            Ok(Ok(image)) => ViewState::Rendered(image),
            Ok(Err(err)) => {
                warn!(err:%; "Render failed");
                ViewState::Error(RENDER_FAILURE_MESSAGE.to_string())
            }
            Err(ResolveError::NoSource) => ViewState::Error(NO_SOURCE_MESSAGE.to_string()),
            Err(ResolveError::MalformedFragment) => {
                ViewState::Error(MALFORMED_SOURCE_MESSAGE.to_string())
            }
        };
        self.transition(next);
        true
    }

    /// Discards the current engine and creates a fresh one.
    pub fn replace_engine(&mut self) {
        self.engine = self.factory.create();
        debug!("Layout engine replaced");
    }

    /// Releases the controller and empties the container.
    pub fn unmount(&mut self) {
        self.release_controller();
        self.container.clear();
    }

    fn transition(&mut self, next: ViewState) {
        let from = self.state.kind();

        self.container.clear();
        self.release_controller();

        if let ViewState::Rendered(image) = &next {
            self.container.append(image.clone());
            let mut controller = self.pan_zoom_factory.attach(image, &self.pan_zoom_config);
            controller.zoom(self.initial_zoom);
            self.controller = Some(controller);
        }

        info!(from, to = next.kind(); "View state changed");
        self.state = next;
    }

    fn release_controller(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.destroy();
            debug!("Pan/zoom controller released");
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.unmount();
    }
}
