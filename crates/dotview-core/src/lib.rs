//! dotview Core Types and Definitions
//!
//! This crate provides the foundational types shared by the dotview viewer:
//!
//! - **Algorithms**: Named Graphviz layout algorithms ([`algorithm::Algorithm`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Images**: Rendered SVG documents and their validation ([`image::VectorImage`])
//! - **View state**: What the viewer page currently shows ([`view::ViewState`])

pub mod algorithm;
pub mod geometry;
pub mod image;
pub mod view;

pub use algorithm::Algorithm;
pub use image::{InvalidImage, VectorImage};
pub use view::ViewState;
