use crate::config::GenerationConfig;
use crate::error::CaptionError;
use crate::model::ImageReference;
use crate::providers::{ChatModel, ChatRequest, DESCRIBE_SYSTEM_PROMPT};
use log::debug;

/// Produces a short natural-language description of an image via one chat
/// call, using prior records as few-shot context.
pub struct DescriptionGenerator<'a> {
    model: &'a dyn ChatModel,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> DescriptionGenerator<'a> {
    pub fn new(model: &'a dyn ChatModel, generation: &GenerationConfig) -> Self {
        DescriptionGenerator {
            model,
            max_tokens: generation.describe_max_tokens,
            temperature: generation.describe_temperature,
        }
    }

    /// Generate a description for the titled image.
    ///
    /// The user message repeats the system instruction, then the example
    /// block, then the title. The image itself is not sent to the endpoint;
    /// the reference only travels with the record.
    pub async fn generate(
        &self,
        image: &ImageReference,
        title: &str,
        examples: &str,
    ) -> Result<String, CaptionError> {
        debug!("Generating description for {} ({})", title, image);

        let request = ChatRequest {
            system: DESCRIBE_SYSTEM_PROMPT.to_string(),
            user: format!(
                "{}\n\n{}\n\nTítulo: {}",
                DESCRIBE_SYSTEM_PROMPT, examples, title
            ),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let description = self.model.complete(&request).await?;
        if description.is_empty() {
            return Err(CaptionError::Generation(
                "Model returned an empty description".to_string(),
            ));
        }

        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::providers::OpenAIModel;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_generate_sends_examples_and_title() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("Ejemplos previos".to_string()),
                Matcher::Regex("Título: Danza de tijeras".to_string()),
                Matcher::Regex(r#""max_tokens":300"#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"content":"Danzantes de tijeras frente a la iglesia."}}]}"#,
            )
            .create_async()
            .await;

        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4-turbo".to_string(),
        );
        let generator = DescriptionGenerator::new(&model, &GenerationConfig::default());

        let description = generator
            .generate(
                &ImageReference::parse("https://example.com/tijeras.jpg"),
                "Danza de tijeras",
                "Ejemplos previos:\n\nTítulo: Altar\nDescripción: Un altar andino.\n\n",
            )
            .await
            .unwrap();

        assert_eq!(description, "Danzantes de tijeras frente a la iglesia.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_empty_reply_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"   "}}]}"#)
            .create_async()
            .await;

        let model = OpenAIModel::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4-turbo".to_string(),
        );
        let generator = DescriptionGenerator::new(&model, &GenerationConfig::default());

        let result = generator
            .generate(
                &ImageReference::parse("https://example.com/foto.jpg"),
                "Danza",
                "No hay descripciones generadas previas.",
            )
            .await;

        assert!(matches!(result, Err(CaptionError::Generation(_))));
    }
}
