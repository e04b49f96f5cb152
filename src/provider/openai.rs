// src/provider/openai.rs — OpenAI-compatible chat completions

use async_trait::async_trait;

use super::{CompletionRequest, ExternalCompletionProvider};
use crate::infra::config::ProviderConfig;
use crate::infra::errors::KaizenError;

pub struct OpenAIProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.openai.com/v1".into())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config, reading the key from the configured env var.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, KaizenError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| KaizenError::MissingCredential {
                provider: "openai".into(),
                env: config.api_key_env.clone(),
            })?;
        Ok(Self::with_base_url(api_key, config.base_url.clone()))
    }

    fn body(request: &CompletionRequest) -> serde_json::Value {
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system,
        })];
        for m in &request.messages {
            messages.push(serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            }));
        }

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        body
    }
}

#[async_trait]
impl ExternalCompletionProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, KaizenError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&Self::body(request))
            .send()
            .await
            .map_err(|e| KaizenError::Provider {
                provider: "openai".into(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(KaizenError::Provider {
                provider: "openai".into(),
                message: format!("HTTP {}: {}", status, error_body),
            });
        }

        let resp: serde_json::Value = response.json().await.map_err(|e| KaizenError::Provider {
            provider: "openai".into(),
            message: format!("Failed to parse response: {}", e),
        })?;

        resp["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| KaizenError::Provider {
                provider: "openai".into(),
                message: "Response had no message content".into(),
            })
    }
}
