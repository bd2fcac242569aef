// Article optimization: request building, the two-phase model pipeline, HTTP surface.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod request;
pub mod schema;
pub mod tone;
