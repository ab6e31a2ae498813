use serde::Deserialize;

use super::errors::TransportError;

/// Envelope returned by the chat-completions endpoint.
///
/// Only the fields the pipeline reads are modelled; everything else in the
/// envelope (usage, fingerprints, logprobs) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

impl ChatCompletionResponse {
    pub fn from_body(body: &str) -> Result<Self, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::Envelope(e.to_string()))
    }

    /// Raw text of the top choice, passed on as-is even when empty.
    pub fn into_content(self) -> Result<String, TransportError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(TransportError::EmptyChoices)?;

        match (choice.message.content, choice.message.refusal) {
            (_, Some(refusal)) => Err(TransportError::Refused(refusal)),
            (Some(content), None) => Ok(content),
            (None, None) => Err(TransportError::Envelope(
                "top choice has no message content".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#"{
        "id": "chatcmpl-BanMQNEdG1cxf0ffcJzpHYfmx0LOt",
        "object": "chat.completion",
        "created": 1748109250,
        "model": "gpt-4o-mini-2024-07-18",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "{\"title\":\"Apple\"}",
                    "refusal": null,
                    "annotations": []
                },
                "logprobs": null,
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 14322, "completion_tokens": 167, "total_tokens": 14489 },
        "service_tier": "default",
        "system_fingerprint": "fp_92e0377081"
    }"#;

    #[test]
    fn test_content_of_top_choice() {
        let response = ChatCompletionResponse::from_body(ENVELOPE).unwrap();
        assert_eq!(response.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        assert_eq!(response.into_content().unwrap(), r#"{"title":"Apple"}"#);
    }

    #[test]
    fn test_empty_choices() {
        let response = ChatCompletionResponse::from_body(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.into_content(),
            Err(TransportError::EmptyChoices)
        ));
    }

    #[test]
    fn test_refusal_is_reported() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null, "refusal": "I can't help"}}]}"#;
        let response = ChatCompletionResponse::from_body(body).unwrap();
        match response.into_content() {
            Err(TransportError::Refused(reason)) => assert_eq!(reason, "I can't help"),
            other => panic!("Expected refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let response = ChatCompletionResponse::from_body(body).unwrap();
        assert!(matches!(
            response.into_content(),
            Err(TransportError::Envelope(_))
        ));
    }

    #[test]
    fn test_empty_content_is_passed_through() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": ""}}]}"#;
        let response = ChatCompletionResponse::from_body(body).unwrap();
        assert_eq!(response.into_content().unwrap(), "");

        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "  \n"}}]}"#;
        let response = ChatCompletionResponse::from_body(body).unwrap();
        assert_eq!(response.into_content().unwrap(), "  \n");
    }

    #[test]
    fn test_malformed_envelope() {
        assert!(matches!(
            ChatCompletionResponse::from_body("<html>bad gateway</html>"),
            Err(TransportError::Envelope(_))
        ));
        assert!(matches!(
            ChatCompletionResponse::from_body(r#"{"error": {"message": "quota"}}"#),
            Err(TransportError::Envelope(_))
        ));
    }
}
