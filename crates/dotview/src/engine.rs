//! Layout engine seam.
//!
//! Graph layout and SVG emission are delegated to an external engine behind
//! the [`LayoutEngine`] trait. Engines are created through an
//! [`EngineFactory`] so a render orchestrator can throw away an instance that
//! failed and start over with a fresh one.
//!
//! [`AlgorithmPolicy`] decides which layout algorithm a given source is
//! rendered with.

mod graphviz;

pub use graphviz::GraphvizEngine;

use std::{io, string::FromUtf8Error};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use dotview_core::{Algorithm, VectorImage};

/// Errors raised by a layout engine while rendering.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("layout engine could not run: {0}")]
    Io(#[from] io::Error),

    #[error("layout engine produced non UTF-8 output: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("layout engine failed: {0}")]
    Failed(String),
}

/// An engine turning graph descriptions into SVG documents.
pub trait LayoutEngine {
    /// Lay out `source` with `algorithm` and return the resulting document.
    ///
    /// An `Ok` result is not necessarily a usable diagram; callers validate
    /// it with [`VectorImage::validate`].
    fn render(&mut self, source: &str, algorithm: Algorithm) -> Result<VectorImage, EngineError>;
}

/// Creates fresh [`LayoutEngine`] instances.
///
/// Implemented for any closure returning an engine.
pub trait EngineFactory {
    fn create(&self) -> Box<dyn LayoutEngine>;
}

impl<F, E> EngineFactory for F
where
    F: Fn() -> E,
    E: LayoutEngine + 'static,
{
    fn create(&self) -> Box<dyn LayoutEngine> {
        Box::new(self())
    }
}

/// Switches to another algorithm once a source grows past a size threshold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SizeRule {
    /// Threshold in KiB; the rule applies to sources strictly larger than this.
    above_kib: u64,
    /// Algorithm used past the threshold.
    algorithm: Algorithm,
}

impl SizeRule {
    pub fn new(above_kib: u64, algorithm: Algorithm) -> Self {
        Self {
            above_kib,
            algorithm,
        }
    }

    fn applies_to(&self, source_bytes: usize) -> bool {
        source_bytes as u64 > self.above_kib.saturating_mul(1024)
    }
}

/// Chooses the layout algorithm for a source.
///
/// Uses the configured default algorithm unless a size rule applies. When
/// several rules apply, the one with the highest threshold wins. There are no
/// size rules by default.
///
/// # Examples
///
/// ```
/// # use dotview::engine::{AlgorithmPolicy, SizeRule};
/// # use dotview_core::Algorithm;
/// let policy = AlgorithmPolicy::new(Algorithm::Dot, vec![SizeRule::new(1, Algorithm::Osage)]);
///
/// assert_eq!(policy.select("digraph { a -> b }"), Algorithm::Dot);
/// assert_eq!(policy.select(&"a;".repeat(1024)), Algorithm::Osage);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlgorithmPolicy {
    #[serde(default)]
    algorithm: Algorithm,

    #[serde(default)]
    size_rules: Vec<SizeRule>,
}

impl AlgorithmPolicy {
    pub fn new(algorithm: Algorithm, size_rules: Vec<SizeRule>) -> Self {
        Self {
            algorithm,
            size_rules,
        }
    }

    /// Returns the algorithm to render `source` with.
    pub fn select(&self, source: &str) -> Algorithm {
        let bytes = source.len();
        let selected = self
            .size_rules
            .iter()
            .filter(|rule| rule.applies_to(bytes))
            .max_by_key(|rule| rule.above_kib)
            .map_or(self.algorithm, |rule| rule.algorithm);
        debug!(source_bytes = bytes, algorithm:% = selected; "Selected layout algorithm");
        selected
    }
}
