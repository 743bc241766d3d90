//! GeminiClient -- concrete [`CompletionClient`] for the Gemini API.
//!
//! Sends one `POST {base_url}/models/{model}:generateContent` per call. The
//! API key is wrapped in [`secrecy::SecretString`] and only exposed when
//! building the request header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use riskguide_core::llm::provider::CompletionClient;
use riskguide_types::error::ConfigError;
use riskguide_types::llm::{CompletionError, CompletionRequest, CompletionResponse, Usage};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini completion client.
///
/// Does not derive Debug so the key cannot end up in logs.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = GenerateContentRequest::from_prompt(&request.prompt);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Transport(format!("HTTP {status}: {error_body}")));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            CompletionError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;

        let text = parsed.first_text().ok_or_else(|| {
            CompletionError::MalformedResponse("response has no candidate text".to_string())
        })?;
        let usage = parsed.usage_metadata.clone().unwrap_or_default();

        Ok(CompletionResponse {
            text,
            model: parsed.model_version.clone().unwrap_or_else(|| self.model.clone()),
            finish_reason: parsed.finish_reason(),
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskguide_types::llm::PromptKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&raw) {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            SecretString::from("test-key-not-real".to_string()),
            "gemini-1.5-pro-latest".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(PromptKind::Summary, "Summarize: [] ")
    }

    #[test]
    fn test_client_name_and_url() {
        let c = client("http://example.test/v1beta/");
        assert_eq!(CompletionClient::name(&c), "gemini");
        assert_eq!(
            c.url(),
            "http://example.test/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[tokio::test]
    async fn test_complete_success() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"Asha is 42."}]},"finishReason":"STOP"}],"usageMetadata":{"promptTokenCount":10,"candidatesTokenCount":4}}"#,
        )
        .await;

        let response = client(&base_url).complete(&request()).await.unwrap();
        let raw_request = server.await.unwrap();

        assert_eq!(response.text, "Asha is 42.");
        assert_eq!(response.model, "gemini-1.5-pro-latest");
        assert_eq!(response.usage.input_tokens, 10);
        assert_eq!(response.usage.output_tokens, 4);

        assert!(raw_request.starts_with(
            "POST /v1beta/models/gemini-1.5-pro-latest:generateContent HTTP/1.1"
        ));
        assert!(raw_request.to_lowercase().contains("x-goog-api-key: test-key-not-real"));
        assert!(raw_request.contains(r#"{"contents":[{"parts":[{"text":"Summarize: [] "}]}]}"#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport() {
        let (base_url, server) =
            serve_once("503 Service Unavailable", r#"{"error":{"message":"overloaded"}}"#).await;

        let err = client(&base_url).complete(&request()).await.unwrap_err();
        server.await.unwrap();

        match err {
            CompletionError::Transport(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_text_is_malformed() {
        let (base_url, server) = serve_once("200 OK", r#"{"candidates":[]}"#).await;

        let err = client(&base_url).complete(&request()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let (base_url, server) = serve_once("200 OK", "<html>proxy error</html>").await;

        let err = client(&base_url).complete(&request()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/v1beta"))
            .complete(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
