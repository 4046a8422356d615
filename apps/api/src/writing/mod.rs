// Writing assistance: prompt construction, the single model call, and
// normalization of the reply into the shape each operation expects.
// All model calls go through llm_client; nothing here talks HTTP to Gemini.

pub mod frozen;
pub mod handlers;
pub mod normalizer;
pub mod operation;
pub mod prompt_builder;
pub mod prompts;
pub mod schemas;
pub mod service;
