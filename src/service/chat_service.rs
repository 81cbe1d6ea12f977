use std::sync::Arc;

use tokio::sync::Mutex;

use crate::handlers::function_call;
use crate::models::chat::{ChatMessage, ModelReply, ToolResponse};
use crate::service::openai_service::ChatModel;
use crate::service::schedule_service::ScheduleStore;

pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

// One conversation with the model. Each user turn runs the full
// request -> optional function dispatch -> confirmation round trip and
// appends every step to the visible history.
pub struct ChatSession {
    history: Vec<ChatMessage>,
    model: Arc<dyn ChatModel>,
    store: Arc<Mutex<ScheduleStore>>,
}

impl ChatSession {
    pub fn new(model: Arc<dyn ChatModel>, store: Arc<Mutex<ScheduleStore>>) -> Self {
        Self {
            history: Vec::new(),
            model,
            store,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    // Never fails from the caller's point of view: any model or transport
    // error degrades to a fixed apology appended to the history.
    pub async fn send(&mut self, text: &str) -> String {
        self.history.push(ChatMessage::user(text));
        match self.advance().await {
            Ok(reply) => reply,
            Err(err) => {
                eprintln!("Error from model API: {}", err);
                self.history.push(ChatMessage::model_text(APOLOGY_MESSAGE));
                APOLOGY_MESSAGE.to_string()
            }
        }
    }

    async fn advance(&mut self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let reply = self.model.get_reply(&self.history).await?;

        let call = match reply {
            ModelReply::Text(text) => {
                self.history.push(ChatMessage::model_text(&text));
                return Ok(text);
            }
            ModelReply::FunctionCall(call) => call,
        };

        self.history.push(ChatMessage::model_call(call.clone()));

        let outcome = {
            let mut store = self.store.lock().await;
            function_call::dispatch(&mut store, &call)
        };
        self.history.push(ChatMessage::function_result(
            &outcome.message,
            ToolResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response: outcome.result,
            },
        ));

        // The model gets the structured result and replies with the final
        // natural-language confirmation. A second call request in the same
        // turn is out of contract and treated as an error.
        match self.model.get_reply(&self.history).await? {
            ModelReply::Text(text) => {
                self.history.push(ChatMessage::model_text(&text));
                Ok(text)
            }
            ModelReply::FunctionCall(call) => {
                Err(format!("Model requested a second function call in one turn: {}", call.name)
                    .into())
            }
        }
    }
}
