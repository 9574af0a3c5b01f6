//! dotview CLI library
//!
//! This module contains the core CLI logic for the dotview graph viewer.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};

use dotview::{DotviewError, ViewState, Viewer, parse_location};

/// Run the dotview CLI application
///
/// This function resolves the graph carried by the location, renders it into
/// a viewer page and writes the page to the output file. The page is written
/// even when it ends up showing an error.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DotviewError` for:
/// - Invalid locations
/// - Configuration loading errors
/// - File I/O errors
/// - Pages whose view ends in an error (no source, rendering failure)
pub fn run(args: &Args) -> Result<(), DotviewError> {
    info!(
        location = args.location,
        output_path = args.output;
        "Processing location"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let location = parse_location(&args.location)?;

    let mut page = Viewer::new(app_config)?.page(location);
    page.mount();

    let document = match args.output_format() {
        OutputFormat::Html => page.to_html(),
        OutputFormat::Svg => page.to_svg(),
    };
    fs::write(&args.output, document)?;

    match page.view() {
        ViewState::Error(message) => {
            warn!(output_file = args.output; "Page written with an error view");
            Err(DotviewError::View(message.clone()))
        }
        _ => {
            info!(output_file = args.output; "Page exported successfully");
            Ok(())
        }
    }
}
