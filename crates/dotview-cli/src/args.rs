//! Command-line argument definitions for the dotview CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the page location, output path and
//! format, configuration file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

/// Output document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML viewer page
    Html,
    /// Bare SVG viewport
    Svg,
}

impl OutputFormat {
    /// Infers the format from an output file extension, defaulting to HTML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => Self::Svg,
            _ => Self::Html,
        }
    }
}

/// Command-line arguments for the dotview graph viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Page location carrying the graph, e.g. `https://host/#digraph%20%7Ba-%3Eb%7D`,
    /// `https://host/?path=graph.dot` or a bare `#digraph%7Ba%7D`
    #[arg(help = "Page location carrying the graph")]
    pub location: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.html")]
    pub output: String,

    /// Output format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the requested output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path("graph.svg"), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path("graph.SVG"), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path("graph.html"), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path("graph"), OutputFormat::Html);
    }

    #[test]
    fn test_explicit_format_wins() {
        let args = Args::parse_from(["dotview", "#a", "-o", "page.svg", "--format", "html"]);
        assert_eq!(args.output_format(), OutputFormat::Html);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["dotview", "#digraph%7B%7D"]);
        assert_eq!(args.location, "#digraph%7B%7D");
        assert_eq!(args.output, "out.html");
        assert_eq!(args.output_format(), OutputFormat::Html);
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }
}
