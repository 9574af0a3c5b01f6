//! Rendered SVG documents.
//!
//! A [`VectorImage`] is what a layout engine hands back. Engines do not always
//! signal failure by returning an error: a broken document can come back
//! looking like a success, with an XML parser error embedded in its markup.
//! [`VectorImage::validate`] is the single place where such payloads are told
//! apart from real diagrams.

use std::fmt;

use log::trace;
use thiserror::Error;

use crate::geometry::Size;

/// Error markers XML parsers embed in documents they failed to parse.
///
/// Blink reports failures in a `<parsererror>` element, Gecko in a
/// `<sourcetext>` element.
const ERROR_MARKERS: [&str; 2] = ["<parsererror", "<sourcetext"];

/// CSS pixels per typographic point.
const PX_PER_PT: f32 = 96.0 / 72.0;

/// Reasons a returned document is not a usable diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidImage {
    #[error("rendered document is empty")]
    Empty,

    #[error("rendered document contains the error marker `{0}`")]
    ErrorMarker(&'static str),

    #[error("rendered document is not well-formed XML: {0}")]
    Malformed(String),

    #[error("rendered document root is `{0}`, expected `svg`")]
    NotSvg(String),
}

/// An SVG document produced by a layout engine.
#[derive(Clone, PartialEq, Eq)]
pub struct VectorImage {
    markup: String,
}

impl VectorImage {
    /// Wraps engine output without checking it.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Returns the full document text as produced by the engine.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Checks that the document is a real diagram rather than an error payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidImage`] when the markup is blank, carries one of the
    /// known parser error markers, is not well-formed XML, or its root
    /// element is not `<svg>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dotview_core::image::{InvalidImage, VectorImage};
    /// let ok = VectorImage::new(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#);
    /// assert!(ok.validate().is_ok());
    ///
    /// let broken = VectorImage::new("<svg><parsererror>bad</parsererror></svg>");
    /// assert_eq!(broken.validate(), Err(InvalidImage::ErrorMarker("<parsererror")));
    /// ```
    pub fn validate(&self) -> Result<(), InvalidImage> {
        if self.markup.trim().is_empty() {
            return Err(InvalidImage::Empty);
        }

        if let Some(marker) = ERROR_MARKERS
            .iter()
            .find(|marker| self.markup.contains(**marker))
        {
            return Err(InvalidImage::ErrorMarker(*marker));
        }

        let doc = parse_document(&self.markup)
            .map_err(|err| InvalidImage::Malformed(err.to_string()))?;
        let root = doc.root_element().tag_name().name();
        if root != "svg" {
            return Err(InvalidImage::NotSvg(root.to_string()));
        }

        Ok(())
    }

    /// Returns the `<svg>` element markup, without any XML declaration,
    /// doctype or leading comments, ready to be embedded in another document.
    ///
    /// Falls back to the full markup if the document cannot be parsed.
    pub fn root_markup(&self) -> &str {
        match parse_document(&self.markup) {
            Ok(doc) => &self.markup[doc.root_element().range()],
            Err(_) => &self.markup,
        }
    }

    /// Returns the image's intrinsic size in CSS pixels.
    ///
    /// Uses the root `width`/`height` attributes (Graphviz emits them in
    /// points) and falls back to the `viewBox` dimensions.
    pub fn intrinsic_size(&self) -> Option<Size> {
        let doc = parse_document(&self.markup).ok()?;
        let root = doc.root_element();

        let width = root.attribute("width").and_then(parse_length);
        let height = root.attribute("height").and_then(parse_length);
        let size = match (width, height) {
            (Some(width), Some(height)) => Some(Size::new(width, height)),
            _ => root.attribute("viewBox").and_then(parse_view_box),
        };
        trace!(size:?; "Read intrinsic image size");
        size.filter(|size| !size.is_empty())
    }
}

impl fmt::Debug for VectorImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorImage")
            .field("len", &self.markup.len())
            .finish()
    }
}

/// Parses markup, accepting the external doctype Graphviz emits.
fn parse_document(markup: &str) -> Result<roxmltree::Document<'_>, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(markup, options)
}

/// Parses an SVG length such as `62pt`, `120px` or `80` into CSS pixels.
///
/// Percentages and other relative units carry no intrinsic size.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    match unit.trim() {
        "" | "px" => Some(number),
        "pt" => Some(number * PX_PER_PT),
        "in" => Some(number * 96.0),
        _ => None,
    }
}

/// Reads the dimensions of a `viewBox` attribute (`min-x min-y width height`).
fn parse_view_box(value: &str) -> Option<Size> {
    let numbers: Vec<f32> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        [_, _, width, height] => Some(Size::new(*width, *height)),
        _ => None,
    }
}
