use std::time::Duration;

use {
    secrecy::{ExposeSecret, Secret},
    tracing::{debug, trace, warn},
};

use manzar_config::CompletionConfig;

use crate::{
    error::{Error, Result},
    extract::extract_or_dump,
    model::ChatMessage,
};

/// Client for Groq's OpenAI-compatible chat completion endpoint.
///
/// One synchronous attempt per request: no retries, hard client timeout.
pub struct GroqProvider {
    api_key: Secret<String>,
    model: String,
    base_url: String,
    max_output_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            client,
        })
    }
}

#[async_trait::async_trait]
impl crate::CompletionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages
                .iter()
                .map(ChatMessage::to_openai_value)
                .collect::<Vec<_>>(),
            "max_output_tokens": self.max_output_tokens,
            "temperature": self.temperature,
        });

        debug!(
            model = %self.model,
            messages_count = messages.len(),
            "groq complete request"
        );
        trace!(body = %serde_json::to_string(&body).unwrap_or_default(), "groq request body");

        let http_resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = http_resp.status();
        if !status.is_success() {
            let body_text = http_resp.text().await.unwrap_or_default();
            warn!(
                status = %status,
                model = %self.model,
                body = %body_text,
                "groq API error"
            );
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let resp = http_resp.json::<serde_json::Value>().await?;
        trace!(response = %resp, "groq raw response");

        let text = extract_or_dump(&resp);
        if text.trim().is_empty() {
            return Err(Error::EmptyReply);
        }
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{CompletionProvider, prompt::build_messages};

    fn test_config(base_url: String) -> CompletionConfig {
        CompletionConfig {
            api_key: Secret::new("test-key".into()),
            model: "gemma2-3b".into(),
            base_url,
            max_output_tokens: 180,
            temperature: 0.7,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn complete_returns_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"wah bhai wah"}}]}"#)
            .create_async()
            .await;

        let provider = GroqProvider::new(&test_config(server.url())).unwrap();
        let reply = provider
            .complete(&build_messages("hello", None))
            .await
            .unwrap();
        assert_eq!(reply, "wah bhai wah");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_body_carries_model_and_limits() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gemma2-3b",
                "max_output_tokens": 180,
            })))
            .with_status(200)
            .with_body(r#"{"response":"theek hai"}"#)
            .create_async()
            .await;

        let provider = GroqProvider::new(&test_config(server.url())).unwrap();
        let reply = provider
            .complete(&build_messages("hello", Some("roast")))
            .await
            .unwrap();
        assert_eq!(reply, "theek hai");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_500_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let provider = GroqProvider::new(&test_config(server.url())).unwrap();
        let err = provider
            .complete(&build_messages("hello", None))
            .await
            .unwrap_err();
        match err {
            Error::Upstream { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            },
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let provider = GroqProvider::new(&test_config(server.url())).unwrap();
        let err = provider
            .complete(&build_messages("hello", None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn unknown_shape_degrades_to_dump() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"weird":"envelope"}"#)
            .create_async()
            .await;

        let provider = GroqProvider::new(&test_config(server.url())).unwrap();
        let reply = provider
            .complete(&build_messages("hello", None))
            .await
            .unwrap();
        assert!(reply.contains("weird"));
    }
}
