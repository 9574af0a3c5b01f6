use std::fs;

use tempfile::TempDir;

use dotview::DotviewError;
use dotview_cli::{Args, OutputFormat, run};

/// A scratch directory holding an empty config file, so no test picks up a
/// configuration from the working directory or the user's config directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
        Self { dir }
    }

    fn args(&self, location: &str, output: &str) -> Args {
        Args {
            location: location.to_string(),
            output: self.dir.path().join(output).display().to_string(),
            format: None,
            config: Some(self.dir.path().join("config.toml").display().to_string()),
            log_level: "off".to_string(),
        }
    }
}

#[test]
fn test_location_without_source_writes_error_page() {
    let workspace = Workspace::new();
    let args = workspace.args("https://example.com/viewer", "out.html");

    let result = run(&args);

    assert!(matches!(result, Err(DotviewError::View(ref message)) if message == "No graph source found in URL"));
    let page = fs::read_to_string(&args.output).expect("page should be written");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("No graph source found in URL"));
}

#[test]
fn test_svg_format_is_inferred_from_extension() {
    let workspace = Workspace::new();
    let args = workspace.args("#", "out.svg");

    let result = run(&args);

    assert!(matches!(result, Err(DotviewError::View(_))));
    let document = fs::read_to_string(&args.output).expect("svg should be written");
    assert!(document.starts_with("<svg"));
    assert!(document.contains("No graph source found in URL"));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let workspace = Workspace::new();
    let mut args = workspace.args("#", "out.html");
    args.format = Some(OutputFormat::Svg);

    let _ = run(&args);

    let document = fs::read_to_string(&args.output).expect("svg should be written");
    assert!(document.starts_with("<svg"));
}

#[test]
fn test_invalid_location_is_rejected_before_writing() {
    let workspace = Workspace::new();
    let args = workspace.args("not a url", "out.html");

    let result = run(&args);

    assert!(matches!(result, Err(DotviewError::Location { .. })));
    assert!(!fs::exists(&args.output).expect("Failed to check output"));
}

#[test]
fn test_bad_config_is_reported() {
    let workspace = Workspace::new();
    let config = workspace.dir.path().join("bad.toml");
    fs::write(&config, "[pan_zoom]\nmin_zoom = -1.0\n").expect("Failed to write config");

    let mut args = workspace.args("#", "out.html");
    args.config = Some(config.display().to_string());

    assert!(matches!(run(&args), Err(DotviewError::Config(_))));
    assert!(!fs::exists(&args.output).expect("Failed to check output"));
}
