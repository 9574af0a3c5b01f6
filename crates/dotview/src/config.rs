//! Configuration types for the dotview viewer.
//!
//! This module provides configuration structures that control how graphs are
//! rendered, how the pan/zoom viewport behaves and how remote sources are
//! fetched. All types implement [`serde::Deserialize`] for flexible loading
//! from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RenderConfig`] - Layout algorithm policy and initial zoom level.
//! - [`PanZoomConfig`] - Zoom bounds, sensitivity and fit/center behavior.
//! - [`FetchConfig`] - Network settings for `path=` sources.
//!
//! # Example
//!
//! ```
//! # use dotview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().initial_zoom(), 0.8);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::{DotviewError, engine::AlgorithmPolicy};

pub use crate::panzoom::PanZoomConfig;

/// Zoom level applied to a freshly attached pan/zoom controller.
pub const DEFAULT_INITIAL_ZOOM: f32 = 0.8;

/// Default timeout for fetching a remote graph description.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration combining render, pan/zoom and fetch settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Pan/zoom configuration section.
    #[serde(default)]
    pan_zoom: PanZoomConfig,

    /// Fetch configuration section.
    #[serde(default)]
    fetch: FetchConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, pan_zoom: PanZoomConfig, fetch: FetchConfig) -> Self {
        Self {
            render,
            pan_zoom,
            fetch,
        }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the pan/zoom configuration.
    pub fn pan_zoom(&self) -> &PanZoomConfig {
        &self.pan_zoom
    }

    /// Returns the fetch configuration.
    pub fn fetch(&self) -> &FetchConfig {
        &self.fetch
    }

    /// Rejects settings no viewer could honor.
    ///
    /// # Errors
    ///
    /// Returns [`DotviewError::Config`] for non-positive or non-finite zoom
    /// levels, inverted zoom bounds and empty viewports.
    pub fn validate(&self) -> Result<(), DotviewError> {
        let pan_zoom = &self.pan_zoom;
        if !is_positive(pan_zoom.min_zoom()) {
            return Err(invalid("pan_zoom.min_zoom must be a positive number"));
        }
        if !is_positive(pan_zoom.max_zoom()) || pan_zoom.max_zoom() < pan_zoom.min_zoom() {
            return Err(invalid(
                "pan_zoom.max_zoom must be a number not smaller than pan_zoom.min_zoom",
            ));
        }
        if !is_positive(pan_zoom.zoom_scale_sensitivity()) {
            return Err(invalid(
                "pan_zoom.zoom_scale_sensitivity must be a positive number",
            ));
        }
        let viewport = pan_zoom.viewport_size();
        if !is_positive(viewport.width()) || !is_positive(viewport.height()) {
            return Err(invalid(
                "pan_zoom.viewport_width and viewport_height must be positive numbers",
            ));
        }
        if !is_positive(self.render.initial_zoom()) {
            return Err(invalid("render.initial_zoom must be a positive number"));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: &str) -> DotviewError {
    DotviewError::Config(format!("Validation error: {message}"))
}

/// Render settings: which layout algorithm to use and the initial zoom.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Algorithm selection policy (`algorithm` and `size_rules` keys).
    #[serde(flatten)]
    policy: AlgorithmPolicy,

    /// Zoom level set on every newly attached controller.
    #[serde(default = "default_initial_zoom")]
    initial_zoom: f32,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    pub fn new(policy: AlgorithmPolicy, initial_zoom: f32) -> Self {
        Self {
            policy,
            initial_zoom,
        }
    }

    /// Returns the algorithm selection policy.
    pub fn policy(&self) -> &AlgorithmPolicy {
        &self.policy
    }

    /// Returns the initial zoom level.
    pub fn initial_zoom(&self) -> f32 {
        self.initial_zoom
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            policy: AlgorithmPolicy::default(),
            initial_zoom: DEFAULT_INITIAL_ZOOM,
        }
    }
}

fn default_initial_zoom() -> f32 {
    DEFAULT_INITIAL_ZOOM
}

/// Network settings for fetching `path=` sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    timeout_secs: u64,
}

impl FetchConfig {
    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}
