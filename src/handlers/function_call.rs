use serde_json::{Value, json};

use crate::models::chat::ToolCall;
use crate::service::schedule_service::ScheduleStore;

// Result of executing one model-requested function: a structured JSON value
// fed back to the model and a human-readable line for the transcript.
#[derive(Debug, Clone)]
pub struct FunctionOutcome {
    pub result: Value,
    pub message: String,
}

fn str_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key)?.as_str().map(|s| s.to_string())
}

fn minutes_arg(args: &Value, key: &str) -> Option<u32> {
    let value = args.get(key)?;
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    // The schema says "number"; some models send it as a float.
    value
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u32)
}

fn missing_argument(name: &str) -> FunctionOutcome {
    FunctionOutcome {
        result: json!({ "error": format!("Missing or invalid argument: {}", name) }),
        message: "Sorry, that request was missing some required details.".to_string(),
    }
}

// Maps the four declared function names onto store operations. Unknown names
// and bad arguments are reported back to the model as structured errors; the
// conversation continues either way.
pub fn dispatch(store: &mut ScheduleStore, call: &ToolCall) -> FunctionOutcome {
    match call.name.as_str() {
        "add_appointment" => {
            let Some(title) = str_arg(&call.args, "title") else {
                return missing_argument("title");
            };
            let Some(date) = str_arg(&call.args, "date") else {
                return missing_argument("date");
            };
            let Some(time) = str_arg(&call.args, "time") else {
                return missing_argument("time");
            };
            let reminder_minutes = minutes_arg(&call.args, "reminderMinutes");

            let appointment = store.add(&title, &date, &time, reminder_minutes);
            let reminder_text = match reminder_minutes {
                Some(minutes) => format!(" with a reminder {} minutes before", minutes),
                None => String::new(),
            };
            FunctionOutcome {
                result: serde_json::to_value(&appointment).unwrap_or(Value::Null),
                message: format!(
                    "Added appointment \"{}\" on {} at {}{}. The ID for this appointment is {}.",
                    title, date, time, reminder_text, appointment.id
                ),
            }
        }
        "delete_appointment" => {
            let Some(id) = str_arg(&call.args, "id") else {
                return missing_argument("id");
            };
            let success = store.delete(&id);
            FunctionOutcome {
                result: json!({ "success": success }),
                message: if success {
                    "Successfully deleted appointment.".to_string()
                } else {
                    format!("Could not find appointment with ID {}.", id)
                },
            }
        }
        "list_appointments" => {
            let appointments = store.list();
            FunctionOutcome {
                result: serde_json::to_value(appointments).unwrap_or(Value::Null),
                message: if appointments.is_empty() {
                    "You have no appointments.".to_string()
                } else {
                    "Here are your appointments.".to_string()
                },
            }
        }
        "set_reminder" => {
            let Some(id) = str_arg(&call.args, "id") else {
                return missing_argument("id");
            };
            let Some(minutes) = minutes_arg(&call.args, "reminderMinutes") else {
                return missing_argument("reminderMinutes");
            };
            match store.set_reminder(&id, minutes) {
                Some(updated) => FunctionOutcome {
                    result: serde_json::to_value(&updated).unwrap_or(Value::Null),
                    message: format!(
                        "OK. I've set a reminder for \"{}\" to go off {} minutes before the scheduled time.",
                        updated.title, minutes
                    ),
                },
                None => FunctionOutcome {
                    result: json!({ "success": false, "error": "Appointment not found" }),
                    message: format!("Sorry, I couldn't find an appointment with ID {}.", id),
                },
            }
        }
        _ => FunctionOutcome {
            result: json!({ "error": "Unknown function" }),
            message: "Sorry, I don't know how to do that.".to_string(),
        },
    }
}
