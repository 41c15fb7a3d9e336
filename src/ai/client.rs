use async_trait::async_trait;
use super::gemini::GeminiProvider;
use super::models::{AIError, AIProvider};
use super::openai::OpenAIProvider;
use crate::analysis::SentimentClassifier;

pub struct AIClient {
    gemini_provider: Option<GeminiProvider>,
    openai_provider: Option<OpenAIProvider>,
}

/// Few-shot prompt pinning the model to a one-word answer from the
/// closed label set.
fn sentiment_prompt(content: &str) -> String {
    format!(
        r#"Analyze the sentiment of the following comment. Respond with only one word: positive, negative, or neutral. Do not include any explanations, translations, or additional text.

  Comment: "Awesome video! I love it!"
  positive

  Comment: "This video is terrible. I hate it."
  negative

  Comment: "This video is good. I like it."
  neutral

  Comment: "{}"
  "#,
        content
    )
}

impl AIClient {
    pub fn new(gemini_api_key: Option<String>, openai_api_key: Option<String>) -> Self {
        Self {
            gemini_provider: gemini_api_key.map(GeminiProvider::new),
            openai_provider: openai_api_key.map(OpenAIProvider::new),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.gemini_provider.is_some() || self.openai_provider.is_some()
    }

    /// Ask the configured provider for a sentiment label. Returns the
    /// raw model text; callers normalize it into the label set.
    pub async fn classify_sentiment(&self, content: &str) -> Result<String, AIError> {
        self.generate_response(&sentiment_prompt(content)).await
    }

    async fn generate_response(&self, prompt: &str) -> Result<String, AIError> {
        // Default to Gemini if available, otherwise use OpenAI
        if let Some(provider) = &self.gemini_provider {
            provider.generate_response(prompt).await
        } else if let Some(provider) = &self.openai_provider {
            provider.generate_response(prompt).await
        } else {
            Err(AIError::APIError("No AI provider available".to_string()))
        }
    }
}

#[async_trait]
impl SentimentClassifier for AIClient {
    async fn classify(&self, text: &str) -> Result<String, AIError> {
        self.classify_sentiment(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_comment_and_the_label_set() {
        let prompt = sentiment_prompt("Best tutorial I've seen all year");
        assert!(prompt.contains("Best tutorial I've seen all year"));
        assert!(prompt.contains("positive, negative, or neutral"));
    }

    #[tokio::test]
    async fn no_provider_is_an_api_error() {
        let client = AIClient::new(None, None);
        assert!(!client.has_provider());
        let err = client.classify_sentiment("anything").await.unwrap_err();
        assert!(matches!(err, AIError::APIError(_)));
    }
}
