//! Pan/zoom controllers over rendered diagrams.
//!
//! A controller wraps a mounted [`VectorImage`] and tracks how it is placed
//! inside the diagram container. The render orchestrator owns at most one
//! controller at a time and always calls [`PanZoom::destroy`] before letting
//! go of it.
//!
//! [`Viewport`] is the built-in controller. It mirrors the usual browser
//! pan/zoom behavior: the image is first fitted and centered in the
//! container, and zoom levels are relative to that fitted size.

use log::{debug, warn};
use serde::Deserialize;

use dotview_core::{
    VectorImage,
    geometry::{Point, Size},
};

/// Settings for pan/zoom controllers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanZoomConfig {
    /// Whether user gestures may zoom. Programmatic zoom is always allowed.
    zoom_enabled: bool,
    /// Whether zoom control icons are drawn over the diagram.
    control_icons_enabled: bool,
    /// Scale the image to fit the container on attach.
    fit: bool,
    /// Center the image in the container on attach.
    center: bool,
    /// Smallest allowed zoom level.
    min_zoom: f32,
    /// Largest allowed zoom level.
    max_zoom: f32,
    /// Zoom factor step per wheel notch.
    zoom_scale_sensitivity: f32,
    /// Container width in CSS pixels.
    viewport_width: f32,
    /// Container height in CSS pixels.
    viewport_height: f32,
}

impl PanZoomConfig {
    pub fn zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    pub fn control_icons_enabled(&self) -> bool {
        self.control_icons_enabled
    }

    pub fn fit(&self) -> bool {
        self.fit
    }

    pub fn center(&self) -> bool {
        self.center
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn zoom_scale_sensitivity(&self) -> f32 {
        self.zoom_scale_sensitivity
    }

    /// Returns the container size.
    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Clamps `level` into `[min_zoom, max_zoom]`.
    ///
    /// Never panics: a NaN bound is ignored, and the lower bound wins over an
    /// inverted upper bound.
    pub fn clamp_zoom(&self, level: f32) -> f32 {
        level.min(self.max_zoom).max(self.min_zoom)
    }
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            control_icons_enabled: false,
            fit: true,
            center: true,
            min_zoom: 0.001,
            max_zoom: 200.0,
            zoom_scale_sensitivity: 0.5,
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

/// Uniform scale followed by a translation, mapping image space to
/// container space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    translate: Point,
}

impl ViewTransform {
    pub fn new(scale: f32, translate: Point) -> Self {
        Self { scale, translate }
    }

    pub fn scale(self) -> f32 {
        self.scale
    }

    pub fn translate(self) -> Point {
        self.translate
    }

    /// Formats the transform as an SVG/CSS `matrix(...)` function.
    ///
    /// ```
    /// # use dotview::panzoom::ViewTransform;
    /// # use dotview_core::geometry::Point;
    /// let transform = ViewTransform::new(2.0, Point::new(10.0, -5.0));
    /// assert_eq!(transform.to_matrix(), "matrix(2 0 0 2 10 -5)");
    /// ```
    pub fn to_matrix(self) -> String {
        format!(
            "matrix({} 0 0 {} {} {})",
            self.scale,
            self.scale,
            self.translate.x(),
            self.translate.y()
        )
    }
}

/// A live pan/zoom controller attached to a mounted image.
pub trait PanZoom {
    /// Sets the zoom level relative to the initial (fitted) size, keeping the
    /// container center fixed.
    fn zoom(&mut self, level: f32);

    /// Releases the controller. Further calls have no effect.
    fn destroy(&mut self);

    /// Current placement of the image, if the controller tracks one.
    fn transform(&self) -> Option<ViewTransform> {
        None
    }
}

/// Attaches pan/zoom controllers to freshly mounted images.
pub trait PanZoomFactory {
    fn attach(&self, image: &VectorImage, config: &PanZoomConfig) -> Box<dyn PanZoom>;
}

/// Creates [`Viewport`] controllers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewportFactory;

impl PanZoomFactory for ViewportFactory {
    fn attach(&self, image: &VectorImage, config: &PanZoomConfig) -> Box<dyn PanZoom> {
        let image_size = image
            .intrinsic_size()
            .unwrap_or_else(|| config.viewport_size());
        Box::new(Viewport::new(image_size, config.clone()))
    }
}

/// Viewport controller computing where the image sits in its container.
#[derive(Debug, Clone)]
pub struct Viewport {
    config: PanZoomConfig,
    image_size: Size,
    base_scale: f32,
    level: f32,
    pan: Point,
    destroyed: bool,
}

impl Viewport {
    /// Places an image of `image_size` in the container described by `config`.
    pub fn new(image_size: Size, config: PanZoomConfig) -> Self {
        let container = config.viewport_size();
        let base_scale = if config.fit() {
            image_size.fit_scale(container)
        } else {
            1.0
        };

        let mut viewport = Self {
            config,
            image_size,
            base_scale,
            level: 1.0,
            pan: Point::default(),
            destroyed: false,
        };
        if viewport.config.center() {
            viewport.pan = viewport.centered_pan();
        }
        debug!(base_scale, pan:? = viewport.pan; "Viewport attached");
        viewport
    }

    /// Current zoom level relative to the initial size.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Zooms to `level` keeping `focus` (container coordinates) fixed.
    fn zoom_at(&mut self, level: f32, focus: Point) {
        if self.check_destroyed("zoom") {
            return;
        }
        let level = self.config.clamp_zoom(level);
        let ratio = level / self.level;
        // focus - (focus - pan) * ratio
        self.pan = focus.sub_point(focus.sub_point(self.pan).scale(ratio));
        self.level = level;
    }

    fn effective_scale(&self) -> f32 {
        self.base_scale * self.level
    }

    fn centered_pan(&self) -> Point {
        let container = self.config.viewport_size();
        let scaled = self.image_size.scale(self.effective_scale());
        Point::new(
            (container.width() - scaled.width()) / 2.0,
            (container.height() - scaled.height()) / 2.0,
        )
    }

    fn container_center(&self) -> Point {
        let container = self.config.viewport_size();
        Point::new(container.width() / 2.0, container.height() / 2.0)
    }

    fn check_destroyed(&self, operation: &str) -> bool {
        if self.destroyed {
            warn!(operation; "Ignoring operation on destroyed viewport");
        }
        self.destroyed
    }
}

impl PanZoom for Viewport {
    fn zoom(&mut self, level: f32) {
        let center = self.container_center();
        self.zoom_at(level, center);
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn transform(&self) -> Option<ViewTransform> {
        (!self.destroyed).then(|| ViewTransform::new(self.effective_scale(), self.pan))
    }
}
