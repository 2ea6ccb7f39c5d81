// Wizard generation: prompts, parsing of model output and the step functions.
// All model calls go through llm_client::ContentGenerator.

pub mod handlers;
pub mod parse;
pub mod prompts;
pub mod steps;
