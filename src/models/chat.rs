use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Model,
    Function,
}

// A function-call request emitted by the model: name plus raw argument map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub args: Value,
}

// The structured result of executing a tool call, fed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub tool_call: Option<ToolCall>,
    pub tool_response: Option<ToolResponse>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: text.to_string(),
            tool_call: None,
            tool_response: None,
        }
    }

    pub fn model_text(text: &str) -> Self {
        Self {
            role: ChatRole::Model,
            content: text.to_string(),
            tool_call: None,
            tool_response: None,
        }
    }

    pub fn model_call(call: ToolCall) -> Self {
        Self {
            role: ChatRole::Model,
            content: String::new(),
            tool_call: Some(call),
            tool_response: None,
        }
    }

    pub fn function_result(message: &str, response: ToolResponse) -> Self {
        Self {
            role: ChatRole::Function,
            content: message.to_string(),
            tool_call: None,
            tool_response: Some(response),
        }
    }
}

// The model replies with free text or exactly one function-call request;
// extra calls in a single response are never honored.
#[derive(Debug, Clone)]
pub enum ModelReply {
    Text(String),
    FunctionCall(ToolCall),
}
