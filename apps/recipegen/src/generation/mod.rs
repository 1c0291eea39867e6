// Recipe generation: prompts, content calls, validation and the ten-stage pipeline.
// All text-model calls go through llm_client; nothing here talks HTTP directly.

pub mod content;
#[cfg(test)]
pub mod fixtures;
pub mod pipeline;
pub mod prompts;
pub mod stats;
pub mod validator;

pub use pipeline::{GenerationOutcome, RecipePipeline};
