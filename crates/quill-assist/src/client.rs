//! # Gemini Client
//!
//! One `generateContent` call per question.
//!
//! ## Request
//! ```text
//! POST {base_url}/models/{model}:generateContent
//! x-goog-api-key: {api_key}
//!
//! {"contents": [{"parts": [
//!     {"text": SYSTEM_PROMPT},
//!     {"inline_data": {"mime_type": "image/png", "data": "<base64>"}},
//!     {"text": "<question>"}
//! ]}]}
//! ```
//!
//! The answer is the concatenated text parts of the first candidate.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::image::InvoiceImage;

/// Instructions sent ahead of every image.
pub const SYSTEM_PROMPT: &str = "You are an expert in understanding invoices. \
You will receive input images as invoices and you will have to answer questions \
based on the input image. Be flexible with the answers: the user may use a synonym \
for any word related to the invoice. If the question does not pertain to the \
invoice, answer with \"Please ask a question regarding the invoice. Thanks!\".";

/// Header carrying the API key. Kept out of the URL so transport errors
/// never echo it.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Reply the model is told to give for unrelated questions.
pub const OFF_TOPIC_REPLY: &str = "Please ask a question regarding the invoice. Thanks!";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn answer(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// =============================================================================
// Assistant
// =============================================================================

/// Answers questions about invoice images.
pub struct InvoiceAssistant {
    http_client: reqwest::Client,
    config: AssistConfig,
}

impl std::fmt::Debug for InvoiceAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceAssistant")
            .field("config", &self.config)
            .finish()
    }
}

impl InvoiceAssistant {
    pub fn new(config: AssistConfig) -> AssistResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(InvoiceAssistant {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Asks `question` about `image` and returns the model's answer.
    ///
    /// A blank question is still sent; the model is instructed how to
    /// handle it.
    pub async fn ask(&self, image: &InvoiceImage, question: &str) -> AssistResult<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: SYSTEM_PROMPT,
                    },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type(),
                            data: image.to_base64(),
                        },
                    },
                    RequestPart::Text { text: question },
                ],
            }],
        };

        info!(
            model = %self.config.model,
            image_bytes = image.len(),
            mime_type = image.mime_type(),
            "Asking model about invoice image"
        );

        let response = self
            .http_client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Model API request failed");
            return Err(AssistError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let answer = parsed.answer().ok_or(AssistError::EmptyResponse)?;

        debug!(answer_len = answer.len(), "Received model answer");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text { text: "prompt" },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: "AAAA".to_string(),
                        },
                    },
                    RequestPart::Text { text: "question" },
                ],
            }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{"parts": [
                    {"text": "prompt"},
                    {"inline_data": {"mime_type": "image/png", "data": "AAAA"}},
                    {"text": "question"}
                ]}]
            })
        );
    }

    #[test]
    fn test_answer_joins_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "The total "}, {"text": "is Rs.23.61"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.answer().as_deref(), Some("The total is Rs.23.61"));
    }

    #[test]
    fn test_answer_missing() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({"candidates": []})).unwrap();
        assert_eq!(response.answer(), None);

        let response: GenerateContentResponse = serde_json::from_value(
            serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}),
        )
        .unwrap();
        assert_eq!(response.answer(), None);
    }

    #[test]
    fn test_prompt_mentions_off_topic_reply() {
        assert!(SYSTEM_PROMPT.contains(OFF_TOPIC_REPLY));
        assert!(SYSTEM_PROMPT.starts_with("You are an expert in understanding invoices."));
    }
}
