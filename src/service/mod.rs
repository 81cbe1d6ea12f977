pub mod chat_service;
pub mod export_service;
pub mod openai_service;
pub mod schedule_service;
pub mod storage;
