//! Graphviz-backed layout engine.

use graphviz_rust::cmd::{CommandArg, Format};
use log::{debug, trace};

use dotview_core::{Algorithm, VectorImage};

use super::{EngineError, LayoutEngine};

/// Renders DOT sources by running the Graphviz executables.
///
/// Requires Graphviz to be installed and on `PATH`.
#[derive(Debug, Default)]
pub struct GraphvizEngine {
    renders: u64,
}

impl GraphvizEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine for GraphvizEngine {
    fn render(&mut self, source: &str, algorithm: Algorithm) -> Result<VectorImage, EngineError> {
        self.renders += 1;
        debug!(algorithm:% = algorithm, render = self.renders; "Running Graphviz");

        let output = graphviz_rust::exec_dot(
            source.to_string(),
            vec![
                CommandArg::Format(Format::Svg),
                CommandArg::Custom(format!("-K{algorithm}")),
            ],
        )?;
        let markup = String::from_utf8(output)?;
        trace!(bytes = markup.len(); "Graphviz output received");

        Ok(VectorImage::new(markup))
    }
}
