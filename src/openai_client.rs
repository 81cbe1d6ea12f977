use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::chat::{ChatMessage, ChatRole, ModelReply, ToolCall};

const SYSTEM_INSTRUCTION: &str = "You are a helpful schedule assistant. When a user adds an appointment without specifying a reminder, you MUST ask them if they would like to set one. After successfully adding an appointment, confirm it and provide its ID so they can refer to it later for updates or deletion.";

// The fixed catalog of callable operations, advertised on every request.
pub fn function_catalog() -> Vec<Value> {
    let today = Local::now().format("%Y-%m-%d");
    vec![
        json!({
            "type": "function",
            "function": {
                "name": "add_appointment",
                "description": format!("Adds a new appointment to the schedule. Can optionally include a reminder. Today is {}.", today),
                "parameters": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "The title or description of the appointment." },
                        "date": { "type": "string", "description": "The date of the appointment in YYYY-MM-DD format." },
                        "time": { "type": "string", "description": "The time of the appointment in HH:MM (24-hour) format." },
                        "reminderMinutes": { "type": "number", "description": "Optional. Number of minutes before the appointment to send a reminder notification." }
                    },
                    "required": ["title", "date", "time"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": "delete_appointment",
                "description": "Deletes an existing appointment from the schedule using its unique ID.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "The unique ID of the appointment to delete." }
                    },
                    "required": ["id"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": "list_appointments",
                "description": "Lists all current appointments in the schedule.",
                "parameters": {
                    "type": "object",
                    "properties": {}
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": "set_reminder",
                "description": "Sets or updates a reminder for an existing appointment using its unique ID.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "The unique ID of the appointment to set a reminder for." },
                        "reminderMinutes": { "type": "number", "description": "Number of minutes before the appointment to send the reminder." }
                    },
                    "required": ["id", "reminderMinutes"]
                }
            }
        }),
    ]
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Value>,
    tools: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    // The API delivers the argument map as a JSON-encoded string.
    arguments: String,
}

fn wire_message(message: &ChatMessage) -> Value {
    match message.role {
        ChatRole::User => json!({ "role": "user", "content": message.content }),
        ChatRole::Model => {
            if let Some(call) = &message.tool_call {
                json!({
                    "role": "assistant",
                    "content": Value::Null,
                    "tool_calls": [{
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.name,
                            "arguments": call.args.to_string(),
                        }
                    }]
                })
            } else {
                json!({ "role": "assistant", "content": message.content })
            }
        }
        ChatRole::Function => {
            let (id, body) = match &message.tool_response {
                Some(response) => (response.id.clone(), response.response.to_string()),
                None => (String::new(), message.content.clone()),
            };
            json!({ "role": "tool", "tool_call_id": id, "content": body })
        }
    }
}

// Sends the full conversation history plus the function catalog and returns
// either free text or the first (and only honored) function-call request.
pub async fn get_model_reply(
    history: &[ChatMessage],
    api_key: &str,
) -> Result<ModelReply, Box<dyn std::error::Error + Send + Sync>> {
    let mut messages: Vec<Value> =
        vec![json!({ "role": "system", "content": SYSTEM_INSTRUCTION })];
    messages.extend(history.iter().map(wire_message));

    let request = ChatRequest {
        model: "gpt-4o-mini".to_string(),
        messages,
        tools: function_catalog(),
    };

    let client = reqwest::Client::new();
    let response = client
        .post("https://api.openai.com/v1/chat/completions")
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        // Non-2xx response — show raw body for debugging
        println!("Error {}: {}", status, text);
        return Err(format!("Request failed with status {}", status).into());
    }

    let parsed: ChatResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;

    let Some(choice) = parsed.choices.into_iter().next() else {
        println!("No choices found in response.\nRaw body:\n{}", text);
        return Err("No response from OpenAI".to_string().into());
    };

    if let Some(mut calls) = choice.message.tool_calls {
        if !calls.is_empty() {
            let call = calls.remove(0);
            let args: Value = serde_json::from_str(&call.function.arguments)
                .map_err(|e| format!("Failed to parse tool-call arguments: {}", e))?;
            return Ok(ModelReply::FunctionCall(ToolCall {
                id: call.id,
                name: call.function.name,
                args,
            }));
        }
    }

    Ok(ModelReply::Text(choice.message.content.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ToolResponse;

    #[test]
    fn catalog_declares_the_four_operations() {
        let names: Vec<String> = function_catalog()
            .iter()
            .map(|tool| tool["function"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "add_appointment",
                "delete_appointment",
                "list_appointments",
                "set_reminder"
            ]
        );
    }

    #[test]
    fn tool_call_turn_maps_to_assistant_tool_calls() {
        let message = ChatMessage::model_call(ToolCall {
            id: "call_1".to_string(),
            name: "delete_appointment".to_string(),
            args: json!({ "id": "a1" }),
        });
        let wire = wire_message(&message);
        assert_eq!(wire["role"], "assistant");
        assert_eq!(
            wire["tool_calls"][0]["function"]["name"],
            "delete_appointment"
        );
        assert_eq!(
            wire["tool_calls"][0]["function"]["arguments"],
            "{\"id\":\"a1\"}"
        );
    }

    #[test]
    fn function_result_turn_maps_to_tool_role() {
        let message = ChatMessage::function_result(
            "Successfully deleted appointment.",
            ToolResponse {
                id: "call_1".to_string(),
                name: "delete_appointment".to_string(),
                response: json!({ "success": true }),
            },
        );
        let wire = wire_message(&message);
        assert_eq!(wire["role"], "tool");
        assert_eq!(wire["tool_call_id"], "call_1");
        assert_eq!(wire["content"], "{\"success\":true}");
    }
}
