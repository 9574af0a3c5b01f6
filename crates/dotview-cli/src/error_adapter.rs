//! Error adapter for converting DotviewError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use dotview::DotviewError;

/// Adapter rendering a [`DotviewError`] as a miette diagnostic.
///
/// Location errors carry the offending input as source code so the report
/// can point at it.
pub struct ErrorAdapter<'a>(pub &'a DotviewError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DotviewError::Io(_) => "dotview::io",
            DotviewError::Location { .. } => "dotview::location",
            DotviewError::Config(_) => "dotview::config",
            DotviewError::View(_) => "dotview::view",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DotviewError::Location { .. } => {
                "pass a full URL such as `https://host/#digraph%7Ba-%3Eb%7D` or a bare `#fragment`"
            }
            DotviewError::View(_) => {
                "check the graph source and that Graphviz (`dot`) is installed and on PATH"
            }
            DotviewError::Io(_) | DotviewError::Config(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            DotviewError::Location { location, .. } => Some(location as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match &self.0 {
            DotviewError::Location { location, .. } => {
                let span = SourceSpan::new(0.into(), location.len());
                Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
                    Some("not a valid location".to_string()),
                    span,
                ))))
            }
            _ => None,
        }
    }
}

/// Convert a [`DotviewError`] into a list of reportable errors.
pub fn to_reportables(err: &DotviewError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_error_has_code_and_help() {
        let err = DotviewError::View("Graph could not be rendered".to_string());
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        let adapter = &reportables[0];
        assert_eq!(adapter.to_string(), "Graph could not be rendered");
        assert_eq!(adapter.code().unwrap().to_string(), "dotview::view");
        assert!(adapter.help().is_some());
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_location_error_labels_input() {
        let err = dotview::parse_location("no scheme here").unwrap_err();
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "dotview::location");
        assert!(adapter.source_code().is_some());

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].len(), "no scheme here".len());
    }

    #[test]
    fn test_config_error_has_no_help() {
        let err = DotviewError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "dotview::config");
        assert!(adapter.help().is_none());
        assert!(adapter.source_code().is_none());
    }
}
