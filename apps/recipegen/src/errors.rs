use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Run-scoped failures. Each one ends the current generation run; the
/// interactive loop reports it and keeps accepting keywords.
#[derive(Debug, Error)]
pub enum AppError {
    /// Base recipe content could not be generated (hard stop).
    #[error("Recipe content generation failed: {0}")]
    Generation(#[source] LlmError),

    /// The document could not be rendered (hard stop).
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Unexpected error: {0}")]
    Internal(#[from] anyhow::Error),
}
