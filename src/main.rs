#![allow(non_snake_case)]

use std::env;
use std::sync::Arc;

use scheduleChat::cli;
use scheduleChat::config::AppConfig;
use scheduleChat::models::appointment;
use scheduleChat::service::schedule_service::ScheduleStore;
use scheduleChat::service::storage::JsonFileStorage;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let storage = JsonFileStorage::new(appointment::get_db_location());
    let store = ScheduleStore::load(Box::new(storage));
    let shared_store = Arc::new(tokio::sync::Mutex::new(store));

    let openai_api_key = config.prop("OPENAI_API_KEY");
    cli::cli(shared_store, openai_api_key).await;
}
