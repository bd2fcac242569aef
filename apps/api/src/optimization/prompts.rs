// All LLM prompt constants for the Optimization module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Article optimization prompt template.
/// Replace: {persona}, {english_only}, {schema_instruction}, {keyword_history_instruction},
///          {tone_instruction}, {audience_instruction}, {url}
pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"{persona}

{english_only}

{schema_instruction}

1.  **Fetch Content:** First, act as a web crawler. Access the provided URL, parse the main article content, and use that for your analysis. **You must return this raw, unformatted text in the 'fetchedContentText' field.** If the original article is not in English, translate its concepts for your analysis.
2.  **Refine Title:** Based on the content, create a compelling, SEO-friendly English title that is highly clickable.
3.  **Analyze & Suggest Keywords:**
    *   Identify the top 3-5 primary English keywords from the article's topic.
    *   For each keyword, suggest a better English alternative with higher potential.
    *   For BOTH the original and the suggested keyword, you MUST provide an estimated **Keyword Difficulty (KD)** on a 0-100 scale and an estimated monthly **Search Volume** as an integer. Base these estimations on your training data.
    *   Provide a brief reason in English for each suggestion.
    *   {keyword_history_instruction}
4.  **Refine Content:**
    *   Rewrite the article content in English to be more engaging and SEO-optimized. {tone_instruction} {audience_instruction}
    *   **Structure and Formatting:**
        *   Keep paragraphs short and focused (2-4 sentences).
        *   Use frequent H2 and H3 tags for clear hierarchy.
        *   Incorporate `<blockquote>` elements for key takeaways or impactful statements.
        *   Use `<strong>` and `<em>` for emphasis on important terms.
        *   Employ numbered `<ol>` and bulleted `<ul>` lists to make complex information digestible.
        *   Include a concluding summary section (e.g., "Key Takeaways" or "Final Thoughts").
    *   **Keywords & Links:** Naturally integrate the new suggested English keywords and add 2-3 high-quality, relevant backlinks to authoritative domains.
    *   **Visuals:** Instead of complex charts, embed 1-2 well-structured HTML tables or create "Key Insight" boxes using styled `div`s to present data or important points visually.
    *   **Final Output:** Format the entire article as clean, semantic HTML suitable for a WordPress blog post.

URL: {url}"#;

/// Replace: {audience}
pub const AUDIENCE_INSTRUCTION_TEMPLATE: &str = "The target audience is **{audience}**. \
    Tailor the language, complexity, and examples for this group.";

/// Replace: {keywords}
pub const KEYWORD_HISTORY_INSTRUCTION_TEMPLATE: &str = "**User's Preferred Keyword History:** \
    The user has previously focused on these keywords: [{keywords}]. \
    Consider this history to suggest related keywords or build upon their existing strategy \
    to establish topic authority.";

/// Cover image prompt. Replace: {title}
pub const COVER_IMAGE_PROMPT_TEMPLATE: &str = "Create a visually stunning, high-resolution \
    blog cover photo with a 16:9 aspect ratio. The image should be professional, engaging, \
    and directly related to the article title: \"{title}\". The style should be modern and clean.";
