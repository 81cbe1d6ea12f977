use std::sync::Arc;

use inquire::Text;
use tokio::sync::Mutex;

use crate::service::chat_service::ChatSession;
use crate::service::openai_service::OpenAIService;
use crate::service::schedule_service::ScheduleStore;
use crate::tasks::reminder_loop::{self, DesktopNotifier, Notifier};
use crate::tasks::task_runner::TaskRunner;

const GREETING: &str = "Hello! I'm your schedule assistant. How can I help you? You can ask me to add, remove, or list your appointments.";

// Runs the interactive chat with the reminder scan ticking in the
// background. The scan is torn down when the chat loop exits.
pub async fn run_chat(shared_store: Arc<Mutex<ScheduleStore>>, openai_api_key: String) {
    let notifier: Arc<dyn Notifier> = Arc::new(DesktopNotifier::new());

    let mut task_runner = TaskRunner::new();
    task_runner.add_task({
        let store = shared_store.clone();
        let notifier = notifier.clone();
        move || {
            tokio::spawn(async move {
                reminder_loop::run_reminder_loop(store, notifier).await;
            })
        }
    });
    task_runner.start_all();

    let model = Arc::new(OpenAIService::new(openai_api_key));
    let mut session = ChatSession::new(model, shared_store);

    println!("{}", GREETING);
    println!("(Press enter on an empty line to quit.)");
    loop {
        let input = match Text::new("You:").prompt() {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Failed to read input: {}", err);
                break;
            }
        };
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }
        let reply = session.send(trimmed).await;
        println!("Assistant: {}", reply);
    }

    task_runner.abort_all();
}
