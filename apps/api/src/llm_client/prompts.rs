// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Persona line opening every text prompt.
pub const SEO_EXPERT_PERSONA: &str = "You are a world-class SEO expert and copywriter. \
    I will provide a URL and content instructions.";

/// Every generated title, keyword and article body must be English.
pub const ENGLISH_ONLY_INSTRUCTION: &str = "**IMPORTANT: All output you generate, \
    including titles, keywords, and the article content, must be in English.**";

/// Pairs with the response schema the client sends.
pub const SCHEMA_INSTRUCTION: &str = "Your task is to perform the following optimizations \
    and return the result as a single JSON object matching the provided schema.";
