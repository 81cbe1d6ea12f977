use std::fs;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;

use crate::runtime;
use crate::service::export_service;
use crate::service::schedule_service::ScheduleStore;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the schedule assistant (requires OPENAI_API_KEY).
    Chat {},
    /// Add an appointment directly, without the assistant.
    Add {
        title: String,
        date: String,
        time: String,
        #[arg(long)]
        reminder_minutes: Option<u32>,
    },
    /// Print the schedule in chronological order.
    List {},
    /// Delete an appointment by its id.
    Delete { id: String },
    /// Set or replace the reminder lead time for an appointment.
    SetReminder { id: String, minutes: u32 },
    /// Write the schedule as an iCalendar file.
    Export {
        #[arg(default_value = "schedule.ics")]
        path: String,
    },
}

pub async fn cli(shared_store: Arc<Mutex<ScheduleStore>>, openai_api_key: Option<String>) {
    // Fine to panic here
    let cli = Cli::parse();
    match cli.command {
        Commands::Chat {} => {
            let Some(api_key) = openai_api_key else {
                println!("OPENAI_API_KEY must be set for chat mode");
                return;
            };
            runtime::run_chat(shared_store, api_key).await;
        }
        Commands::Add {
            title,
            date,
            time,
            reminder_minutes,
        } => {
            let mut store = shared_store.lock().await;
            let appointment = store.add(&title, &date, &time, reminder_minutes);
            println!(
                "Added \"{}\" on {} at {} (id {})",
                appointment.title, appointment.date, appointment.time, appointment.id
            );
        }
        Commands::List {} => {
            let store = shared_store.lock().await;
            if store.list().is_empty() {
                println!("No appointments scheduled.");
            }
            for appointment in store.list() {
                let reminder = match appointment.reminder_minutes {
                    Some(minutes) => format!(", reminder {} min before", minutes),
                    None => String::new(),
                };
                println!(
                    "{} {} — {} (id {}{})",
                    appointment.date, appointment.time, appointment.title, appointment.id, reminder
                );
            }
        }
        Commands::Delete { id } => {
            let mut store = shared_store.lock().await;
            if store.delete(&id) {
                println!("Deleted appointment {}", id);
            } else {
                println!("No appointment with id {}", id);
            }
        }
        Commands::SetReminder { id, minutes } => {
            let mut store = shared_store.lock().await;
            match store.set_reminder(&id, minutes) {
                Some(appointment) => println!(
                    "Reminder for \"{}\" set to {} minutes before",
                    appointment.title, minutes
                ),
                None => println!("No appointment with id {}", id),
            }
        }
        Commands::Export { path } => {
            let store = shared_store.lock().await;
            let ics = export_service::export_ics(store.list());
            match fs::write(&path, ics) {
                Ok(()) => println!("Wrote {}", path),
                Err(err) => println!("Failed to write {}: {}", path, err),
            }
        }
    }
}
