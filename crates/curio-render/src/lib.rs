//! # curio-render
//!
//! Renderers turning a loaded catalog into publishable documents.

mod error;
mod markdown;

pub use error::RenderError;
pub use markdown::MarkdownSinglePage;

use curio_store::ReferenceIndex;

/// Produces one document from the whole catalog.
pub trait Renderer {
    /// # Errors
    ///
    /// Returns [`RenderError`] if an entity cannot be rendered.
    fn render(&self, index: &ReferenceIndex<'_>) -> Result<String, RenderError>;
}
