//! Model-backed extractor over an `OpenAI`-compatible chat API.
//!
//! The model is asked for a strict JSON mapping of the three fields;
//! `null` marks a field the model could not find. A reply that cannot be
//! parsed is reported as [`ExtractError::MalformedResponse`], which the
//! pipeline degrades to an empty field mapping instead of aborting.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use intake_core::{Extract, ExtractError, ExtractedFields, FieldName};

use crate::retry::retry_with_backoff;

const EXTRACTION_INSTRUCTION: &str = "You are an expert field extractor. \
Extract the following fields from the given document:\n\
- company: The company name or organization\n\
- budget: The budget amount or financial information\n\
- deadline: The deadline or timeline information\n\n\
Return them as a JSON object. If a field is not found, use null.\n\
Example format:\n\
{\"company\": \"Company Name\", \"budget\": \"$50,000\", \"deadline\": \"Q4 2024\"}\n\n\
Only return valid JSON, no additional text.";

pub struct ChatExtractor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatExtractor {
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        info!("Creating ChatExtractor: model={model}");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            model,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Helper method to send a single request.
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .to_string();

        Ok(content)
    }

    /// Parse the model reply into a field mapping.
    ///
    /// # Errors
    /// Returns [`ExtractError::MalformedResponse`] when the reply is not
    /// the requested JSON object. "Field not found" is never an error:
    /// null or absent keys simply stay out of the mapping.
    pub fn parse_fields(content: &str) -> Result<ExtractedFields, ExtractError> {
        let value: serde_json::Value = serde_json::from_str(content.trim())
            .map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;

        let map = value.as_object().ok_or_else(|| {
            ExtractError::MalformedResponse("expected a JSON object".to_string())
        })?;

        let mut fields = ExtractedFields::new();
        for field in FieldName::ALL {
            match map.get(field.as_str()) {
                None | Some(serde_json::Value::Null) => {}
                Some(serde_json::Value::String(s)) => fields.insert(field, s.clone()),
                Some(serde_json::Value::Number(n)) => fields.insert(field, n.to_string()),
                Some(other) => {
                    return Err(ExtractError::MalformedResponse(format!(
                        "unexpected value for {field}: {other}"
                    )));
                }
            }
        }

        Ok(fields)
    }
}

#[async_trait]
impl Extract for ChatExtractor {
    async fn extract(&self, document: &str) -> Result<ExtractedFields, ExtractError> {
        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": EXTRACTION_INSTRUCTION },
                { "role": "user", "content": document },
            ],
        });

        debug!("Sending extraction request: model={}", self.model);

        let content = retry_with_backoff(|| self.try_send(&request), &[2, 4, 8])
            .await
            .map_err(ExtractError::Upstream)?;

        Self::parse_fields(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_parse_full_reply() {
        let fields = ChatExtractor::parse_fields(
            r#"{"company": "Acme", "budget": "$10000", "deadline": "2025-09-01"}"#,
        )
        .expect("valid reply should parse");

        assert_eq!(fields.get(FieldName::Company), Some("Acme"));
        assert_eq!(fields.get(FieldName::Budget), Some("$10000"));
        assert_eq!(fields.get(FieldName::Deadline), Some("2025-09-01"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_null_and_absent_fields_stay_absent() {
        let fields = ChatExtractor::parse_fields(r#"{"company": "Acme", "budget": null}"#)
            .expect("valid reply should parse");

        assert_eq!(fields.get(FieldName::Company), Some("Acme"));
        assert!(!fields.contains(FieldName::Budget));
        assert!(!fields.contains(FieldName::Deadline));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_numeric_budget_is_stringified() {
        let fields = ChatExtractor::parse_fields(r#"{"budget": 10000}"#)
            .expect("valid reply should parse");
        assert_eq!(fields.get(FieldName::Budget), Some("10000"));
    }

    #[test]
    fn test_non_json_reply_is_malformed() {
        let result = ChatExtractor::parse_fields("Sure! The company is Acme.");
        assert!(matches!(result, Err(ExtractError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_object_reply_is_malformed() {
        let result = ChatExtractor::parse_fields(r#"["company", "budget"]"#);
        assert!(matches!(result, Err(ExtractError::MalformedResponse(_))));
    }

    #[test]
    fn test_unexpected_value_type_is_malformed() {
        let result = ChatExtractor::parse_fields(r#"{"company": {"name": "Acme"}}"#);
        assert!(matches!(result, Err(ExtractError::MalformedResponse(_))));
    }
}
