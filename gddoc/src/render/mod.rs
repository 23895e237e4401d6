//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod text;
pub mod xml;

use crate::class::ClassDoc;
use crate::error::{Error, Result};

/// Trait for rendering one class record into a specific output format.
pub trait Renderer {
    fn render(&self, class: &ClassDoc) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "xml" => Ok(Box::new(xml::XmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
