//! Request builder — turns form input plus keyword history into model calls.

use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::prompts::{ENGLISH_ONLY_INSTRUCTION, SCHEMA_INSTRUCTION, SEO_EXPERT_PERSONA};
use crate::llm_client::{ImageGeneration, JsonGeneration};
use crate::optimization::prompts::{
    ARTICLE_PROMPT_TEMPLATE, AUDIENCE_INSTRUCTION_TEMPLATE, COVER_IMAGE_PROMPT_TEMPLATE,
    KEYWORD_HISTORY_INSTRUCTION_TEMPLATE,
};
use crate::optimization::schema::optimization_schema;
use crate::optimization::tone::Tone;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid article URL.";

const ARTICLE_TEMPERATURE: f32 = 0.7;
const COVER_IMAGE_COUNT: u32 = 3;
const COVER_ASPECT_RATIO: &str = "16:9";
const COVER_MIME_TYPE: &str = "image/jpeg";

/// Request body for an optimization run.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub url: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub audience: String,
}

/// Validated form input.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleInput {
    pub url: String,
    pub tone: Tone,
    pub audience: String,
}

impl OptimizeRequest {
    /// Rejects a blank URL, a URL not starting with `http`, or an unknown tone.
    pub fn validate(&self) -> Result<ArticleInput, AppError> {
        let url = self.url.trim();
        if !is_valid_article_url(url) {
            return Err(AppError::Validation(INVALID_URL_MESSAGE.to_string()));
        }

        let tone = self
            .tone
            .parse::<Tone>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(ArticleInput {
            url: url.to_string(),
            tone,
            audience: self.audience.trim().to_string(),
        })
    }
}

pub fn is_valid_article_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url.starts_with("http")
}

/// Phase-1 call: fetch, analyze and rewrite the article.
pub fn build_article_request(input: &ArticleInput, preferred_keywords: &[String]) -> JsonGeneration {
    let audience_instruction = if input.audience.is_empty() {
        String::new()
    } else {
        fill_template(AUDIENCE_INSTRUCTION_TEMPLATE, &[("audience", &input.audience)])
    };

    let keyword_history_instruction = if preferred_keywords.is_empty() {
        String::new()
    } else {
        fill_template(
            KEYWORD_HISTORY_INSTRUCTION_TEMPLATE,
            &[("keywords", &preferred_keywords.join(", "))],
        )
    };

    let tone_instruction = input.tone.instruction();
    let prompt = fill_template(
        ARTICLE_PROMPT_TEMPLATE,
        &[
            ("persona", SEO_EXPERT_PERSONA),
            ("english_only", ENGLISH_ONLY_INSTRUCTION),
            ("schema_instruction", SCHEMA_INSTRUCTION),
            ("keyword_history_instruction", &keyword_history_instruction),
            ("tone_instruction", &tone_instruction),
            ("audience_instruction", &audience_instruction),
            ("url", &input.url),
        ],
    );

    JsonGeneration {
        prompt,
        response_schema: optimization_schema(),
        temperature: ARTICLE_TEMPERATURE,
    }
}

/// Phase-2 call: cover images, parameterized only by the refined title.
pub fn build_image_request(refined_title: &str) -> ImageGeneration {
    ImageGeneration {
        prompt: fill_template(COVER_IMAGE_PROMPT_TEMPLATE, &[("title", refined_title)]),
        count: COVER_IMAGE_COUNT,
        aspect_ratio: COVER_ASPECT_RATIO,
        mime_type: COVER_MIME_TYPE,
    }
}

/// Fills `{name}` placeholders in one pass. Substituted values are not
/// rescanned, so user text containing `{url}` and the like stays literal.
/// Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let replacement = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });
        match replacement {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
