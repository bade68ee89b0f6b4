use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A software item has neither a website nor a source code URL.
    #[error("software '{name}' has no website_url or source_code_url")]
    MissingUrl { name: String },
}
