//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the parsed [`ClassDoc`] directly, before any BBCode is
//! produced, so custom pipelines can do their own rendering.

use crate::class::ClassDoc;
use crate::error::{Error, Result};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, class: &ClassDoc) -> Result<String> {
        let mut out = serde_json::to_string_pretty(class).map_err(|source| Error::Serialize {
            class: class.name.clone(),
            source,
        })?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
