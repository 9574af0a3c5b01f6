//! Integration tests for the page lifecycle.
//!
//! These drive a [`Page`] through the public API with a scripted layout engine
//! and a recording pan/zoom factory, and check what a user would see.

use std::{cell::RefCell, rc::Rc};

use url::Url;

use dotview::{
    Algorithm, Page, VectorImage, ViewState,
    config::AppConfig,
    engine::{EngineError, LayoutEngine},
    orchestrator::{Orchestrator, RENDER_FAILURE_MESSAGE},
    panzoom::{PanZoom, PanZoomConfig, PanZoomFactory},
    parse_location,
    source::{Fetch, FetchError},
};

const SVG: &str = r#"<svg width="40pt" height="20pt" viewBox="0 0 40 20" xmlns="http://www.w3.org/2000/svg"><g/></svg>"#;

type Log = Rc<RefCell<Vec<String>>>;

/// Renders successfully unless the source is `crash` or `bad`; records engine
/// identity.
struct RecordingEngine {
    id: usize,
    log: Log,
}

impl LayoutEngine for RecordingEngine {
    fn render(&mut self, source: &str, algorithm: Algorithm) -> Result<VectorImage, EngineError> {
        self.log
            .borrow_mut()
            .push(format!("engine {} render {algorithm}", self.id));
        if source == "crash" {
            return Err(EngineError::Failed("engine crashed".to_string()));
        }
        if source == "bad" {
            return Ok(VectorImage::new(
                "<svg><parsererror>syntax error in line 1</parsererror></svg>",
            ));
        }
        Ok(VectorImage::new(SVG))
    }
}

struct RecordingController {
    id: usize,
    log: Log,
}

impl PanZoom for RecordingController {
    fn zoom(&mut self, level: f32) {
        self.log
            .borrow_mut()
            .push(format!("controller {} zoom {level}", self.id));
    }

    fn destroy(&mut self) {
        self.log
            .borrow_mut()
            .push(format!("controller {} destroy", self.id));
    }
}

struct RecordingFactory {
    created: RefCell<usize>,
    log: Log,
}

impl PanZoomFactory for RecordingFactory {
    fn attach(&self, _image: &VectorImage, config: &PanZoomConfig) -> Box<dyn PanZoom> {
        *self.created.borrow_mut() += 1;
        let id = *self.created.borrow();
        self.log.borrow_mut().push(format!(
            "controller {id} attach min={} max={}",
            config.min_zoom(),
            config.max_zoom()
        ));
        Box::new(RecordingController {
            id,
            log: Rc::clone(&self.log),
        })
    }
}

/// Serves one file body for every request.
struct FileServer(Option<&'static str>);

impl Fetch for FileServer {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.0.map(str::to_string).ok_or_else(|| FetchError::Status {
            url: url.clone(),
            status: 404,
        })
    }
}

fn build_page(location: &str, server: FileServer, log: &Log) -> Page {
    let engine_log = Rc::clone(log);
    let engines = RefCell::new(0);
    let factory = move || {
        *engines.borrow_mut() += 1;
        RecordingEngine {
            id: *engines.borrow(),
            log: Rc::clone(&engine_log),
        }
    };
    let pan_zoom = RecordingFactory {
        created: RefCell::new(0),
        log: Rc::clone(log),
    };
    let orchestrator = Orchestrator::new(&AppConfig::default(), factory, pan_zoom);
    Page::new(parse_location(location).unwrap(), server, orchestrator)
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn test_fragment_renders_and_zooms_to_initial_level() {
    let log = Log::default();
    let mut page = build_page(
        "https://viewer.test/#digraph%20G%20%7B%20A-%3EB%20%7D",
        FileServer(None),
        &log,
    );

    let view = page.mount();

    assert!(matches!(view, ViewState::Rendered(_)));
    assert_eq!(
        page.orchestrator().container().child().map(VectorImage::markup),
        Some(SVG)
    );
    assert_eq!(
        entries(&log),
        vec![
            "engine 1 render dot",
            "controller 1 attach min=0.001 max=200",
            "controller 1 zoom 0.8",
        ]
    );
}

#[test]
fn test_file_source_is_rendered_without_fragment() {
    let log = Log::default();
    let mut page = build_page(
        "https://viewer.test/?path=graph.dot",
        FileServer(Some("digraph { a }")),
        &log,
    );

    assert!(page.mount().is_diagram_visible());
}

#[test]
fn test_rerender_destroys_previous_controller_once_before_attaching() {
    let log = Log::default();
    let mut page = build_page("https://viewer.test/#digraph%7Ba%7D", FileServer(None), &log);

    page.mount();
    page.navigate(Url::parse("https://viewer.test/#digraph%7Bb%7D").unwrap());

    let log = entries(&log);
    let destroys: Vec<_> = log.iter().filter(|e| e.ends_with("destroy")).collect();
    assert_eq!(destroys, vec!["controller 1 destroy"]);

    let destroy_at = log.iter().position(|e| e == "controller 1 destroy").unwrap();
    let attach_at = log
        .iter()
        .position(|e| e.starts_with("controller 2 attach"))
        .unwrap();
    assert!(destroy_at < attach_at);
}

#[test]
fn test_failed_render_uses_fresh_engine_next_time() {
    let log = Log::default();
    let mut page = build_page("https://viewer.test/#crash", FileServer(None), &log);

    assert_eq!(
        page.mount(),
        &ViewState::Error(RENDER_FAILURE_MESSAGE.to_string())
    );
    assert!(page.to_html().contains(RENDER_FAILURE_MESSAGE));

    page.navigate(Url::parse("https://viewer.test/#digraph%7B%7D").unwrap());

    assert!(page.view().is_diagram_visible());
    let renders: Vec<_> = entries(&log)
        .into_iter()
        .filter(|e| e.contains("render"))
        .collect();
    assert_eq!(renders, vec!["engine 1 render dot", "engine 2 render dot"]);
}

#[test]
fn test_error_marked_output_uses_fresh_engine_next_time() {
    let log = Log::default();
    let mut page = build_page("https://viewer.test/#bad", FileServer(None), &log);

    assert_eq!(
        page.mount(),
        &ViewState::Error(RENDER_FAILURE_MESSAGE.to_string())
    );
    assert!(page.orchestrator().controller().is_none());

    page.navigate(Url::parse("https://viewer.test/#digraph%7B%7D").unwrap());

    assert!(page.view().is_diagram_visible());
    let renders: Vec<_> = entries(&log)
        .into_iter()
        .filter(|e| e.contains("render"))
        .collect();
    assert_eq!(renders, vec!["engine 1 render dot", "engine 2 render dot"]);
}

#[test]
fn test_error_after_render_releases_controller() {
    let log = Log::default();
    let mut page = build_page("https://viewer.test/#digraph%7B%7D", FileServer(None), &log);

    page.mount();
    page.navigate(Url::parse("https://viewer.test/").unwrap());

    assert!(page.view().error().is_some());
    assert!(page.orchestrator().controller().is_none());
    assert!(entries(&log).contains(&"controller 1 destroy".to_string()));
}

#[test]
fn test_dropping_page_releases_controller() {
    let log = Log::default();
    {
        let mut page = build_page("https://viewer.test/#digraph%7B%7D", FileServer(None), &log);
        page.mount();
    }

    assert_eq!(entries(&log).last().map(String::as_str), Some("controller 1 destroy"));
}

#[test]
fn test_explicit_unmount_then_drop_destroys_once() {
    let log = Log::default();
    {
        let mut page = build_page("https://viewer.test/#digraph%7B%7D", FileServer(None), &log);
        page.mount();
        page.unmount();
    }

    let destroys = entries(&log)
        .iter()
        .filter(|e| e.ends_with("destroy"))
        .count();
    assert_eq!(destroys, 1);
}
