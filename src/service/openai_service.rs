use async_trait::async_trait;

use crate::models::chat::{ChatMessage, ModelReply};
use crate::openai_client;

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn get_reply(
        &self,
        history: &[ChatMessage],
    ) -> Result<ModelReply, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct OpenAIService {
    api_key: String,
}

impl OpenAIService {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl ChatModel for OpenAIService {
    async fn get_reply(
        &self,
        history: &[ChatMessage],
    ) -> Result<ModelReply, Box<dyn std::error::Error + Send + Sync>> {
        openai_client::get_model_reply(history, &self.api_key).await
    }
}
