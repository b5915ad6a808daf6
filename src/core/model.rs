use crate::error::{Error, Result};
use async_openai::{
    self,
    config::OpenAIConfig,
    types::responses::{
        CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
        OutputMessageContent, Role,
    },
};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// A single-prompt completion against a hosted model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Builds a client for one request's credential.
pub trait ModelProvider: Send + Sync {
    type Client: ModelClient;

    fn connect(&self, credential: &str) -> Self::Client;
}

#[derive(Clone)]
pub struct HostedModelClient {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl HostedModelClient {
    pub fn new(credential: &str, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(credential)
            .with_api_base(api_base);

        Self {
            client: async_openai::Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ModelClient for HostedModelClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateResponseArgs::default()
            .max_output_tokens(MAX_OUTPUT_TOKENS)
            .model(self.model.as_str())
            .input(InputParam::Items(vec![InputItem::EasyMessage(
                EasyInputMessageArgs::default()
                    .role(Role::User)
                    .content(prompt)
                    .build()?,
            )]))
            .build()?;

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending completion");
        let response = self.client.responses().create(request).await?;

        let mut content = String::new();
        for output in response.output {
            if let OutputItem::Message(out) = output {
                for c in out.content {
                    match c {
                        OutputMessageContent::OutputText(text) => content.push_str(&text.text),
                        _ => {
                            warn!("Unexpected content type: {c:?}");
                            continue;
                        }
                    }
                }
            }
        }

        if content.trim().is_empty() {
            return Err(Error::inference("model returned an empty response"));
        }

        Ok(content.trim().to_string())
    }
}

/// Connects `HostedModelClient`s to a fixed endpoint and model.
#[derive(Debug, Clone)]
pub struct HostedModelProvider {
    pub api_base: String,
    pub model: String,
}

impl HostedModelProvider {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            model: model.into(),
        }
    }
}

impl Default for HostedModelProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_MODEL)
    }
}

impl ModelProvider for HostedModelProvider {
    type Client = HostedModelClient;

    fn connect(&self, credential: &str) -> HostedModelClient {
        HostedModelClient::new(credential, &self.api_base, &self.model)
    }
}
