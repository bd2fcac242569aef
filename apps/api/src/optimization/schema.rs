//! Response schema for the article call, in Gemini's OpenAPI-subset format.

use serde_json::{json, Value};

fn keyword_metric_schema(description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "description": description,
        "properties": {
            "text": { "type": "STRING", "description": "The keyword phrase." },
            "kd": {
                "type": "NUMBER",
                "description": "Estimated Keyword Difficulty (0-100).",
                "minimum": 0,
                "maximum": 100
            },
            "volume": {
                "type": "INTEGER",
                "description": "Estimated monthly search volume.",
                "minimum": 0
            }
        },
        "required": ["text", "kd", "volume"]
    })
}

/// Shape of `OptimizedArticle`.
pub fn optimization_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "refinedTitle": {
                "type": "STRING",
                "description": "The SEO-optimized title for the article."
            },
            "keywordAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "suggestedKeywords": {
                        "type": "ARRAY",
                        "description": "A list of suggested keyword replacements with data.",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "original": keyword_metric_schema("The original keyword and its metrics."),
                                "suggestion": keyword_metric_schema("The suggested new keyword and its metrics."),
                                "reason": {
                                    "type": "STRING",
                                    "description": "The reason for the suggestion."
                                }
                            },
                            "required": ["original", "suggestion", "reason"]
                        }
                    }
                },
                "required": ["suggestedKeywords"]
            },
            "refinedContentHtml": {
                "type": "STRING",
                "description": "The full, rewritten article content in clean, semantic HTML format, ready for publishing."
            },
            "fetchedContentText": {
                "type": "STRING",
                "description": "The raw, unformatted text content that was fetched from the provided URL for analysis."
            }
        },
        "required": ["refinedTitle", "keywordAnalysis", "refinedContentHtml", "fetchedContentText"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_article_fields() {
        let schema = optimization_schema();
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec![
                "refinedTitle",
                "keywordAnalysis",
                "refinedContentHtml",
                "fetchedContentText"
            ]
        );
    }

    #[test]
    fn test_keyword_kd_is_bounded() {
        let schema = optimization_schema();
        let kd = &schema["properties"]["keywordAnalysis"]["properties"]["suggestedKeywords"]
            ["items"]["properties"]["suggestion"]["properties"]["kd"];
        assert_eq!(kd["minimum"], 0);
        assert_eq!(kd["maximum"], 100);
    }
}
