use crate::config::GenerationConfig;
use crate::error::CaptionError;
use crate::providers::{ChatModel, ChatRequest, KEYWORDS_SYSTEM_PROMPT};
use log::debug;

/// Extracts keywords from a generated description via a second chat call.
pub struct KeywordExtractor<'a> {
    model: &'a dyn ChatModel,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(model: &'a dyn ChatModel, generation: &GenerationConfig) -> Self {
        KeywordExtractor {
            model,
            max_tokens: generation.keywords_max_tokens,
            temperature: generation.keywords_temperature,
        }
    }

    /// Ask the model for keywords and decode its reply.
    ///
    /// Transport and provider errors propagate as-is; an undecodable reply
    /// surfaces as [`CaptionError::KeywordParse`], which callers treat as
    /// non-fatal (the record is saved with an empty list).
    pub async fn extract(&self, description: &str) -> Result<Vec<String>, CaptionError> {
        let request = ChatRequest {
            system: KEYWORDS_SYSTEM_PROMPT.to_string(),
            user: format!("{}\n\nDescripción: {}", KEYWORDS_SYSTEM_PROMPT, description),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let reply = self.model.complete(&request).await?;
        debug!("Keyword reply: {:?}", reply);

        parse_keyword_reply(&reply)
    }
}

/// Decode a model reply into an ordered keyword list.
///
/// The endpoint is not contractually bound to emit structured output, so the
/// reply is decoded in two tiers and never evaluated as code:
/// 1. a strict JSON array-of-strings parse, tolerating surrounding prose,
///    quotes or code fences around the array literal;
/// 2. splitting on commas and trimming each segment.
/// A reply with neither an array literal nor a comma is not a list; that
/// yields [`CaptionError::KeywordParse`].
pub fn parse_keyword_reply(raw: &str) -> Result<Vec<String>, CaptionError> {
    if let Some(keywords) = parse_literal_list(raw) {
        if !keywords.is_empty() {
            return Ok(keywords);
        }
    }

    let trimmed = raw.trim();
    if trimmed.contains(',') {
        let keywords: Vec<String> = trimmed
            .split(',')
            .map(|segment| {
                segment
                    .trim()
                    .trim_matches(|c| c == '"' || c == '\'' || c == '[' || c == ']' || c == '.')
                    .trim()
                    .to_string()
            })
            .filter(|keyword| !keyword.is_empty())
            .collect();
        if !keywords.is_empty() {
            return Ok(keywords);
        }
    }

    Err(CaptionError::KeywordParse(raw.to_string()))
}

/// Strict literal parse: take the outermost `[` .. `]` slice and try it as a
/// JSON array of strings. Anything else is rejected.
fn parse_literal_list(raw: &str) -> Option<Vec<String>> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<String>>(&raw[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let keywords = parse_keyword_reply(r#"["a", "b", "c"]"#).unwrap();
        assert_eq!(keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_quoted_json_array() {
        // Some replies wrap the array in quotes or prose
        let keywords = parse_keyword_reply(r#"'["danza", "altar"]'"#).unwrap();
        assert_eq!(keywords, vec!["danza", "altar"]);

        let keywords =
            parse_keyword_reply("Las palabras clave son:\n```json\n[\"danza\"]\n```").unwrap();
        assert_eq!(keywords, vec!["danza"]);
    }

    #[test]
    fn test_parse_comma_separated_fallback() {
        let keywords = parse_keyword_reply("a, b, c").unwrap();
        assert_eq!(keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_comma_separated_with_stray_quotes() {
        let keywords = parse_keyword_reply("'danza', 'procesión', altar.").unwrap();
        assert_eq!(keywords, vec!["danza", "procesión", "altar"]);
    }

    #[test]
    fn test_unparseable_reply_fails() {
        let result = parse_keyword_reply("no sé");
        assert!(matches!(result, Err(CaptionError::KeywordParse(_))));
    }

    #[test]
    fn test_empty_reply_fails() {
        let result = parse_keyword_reply("   ");
        assert!(matches!(result, Err(CaptionError::KeywordParse(_))));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let keywords = parse_keyword_reply(r#"["danza", "danza", "altar"]"#).unwrap();
        assert_eq!(keywords, vec!["danza", "danza", "altar"]);
    }

    #[test]
    fn test_malformed_array_falls_back_to_commas() {
        // Unterminated string inside the brackets, but commas still split
        let keywords = parse_keyword_reply(r#"["danza, altar"#).unwrap();
        assert_eq!(keywords, vec!["danza", "altar"]);
    }
}
