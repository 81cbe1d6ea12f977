pub mod appointment;
pub mod chat;
