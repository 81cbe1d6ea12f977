#![allow(non_snake_case)]

pub mod cli;
pub mod config;
pub mod handlers;
pub mod models;
pub mod openai_client;
pub mod runtime;
pub mod service;
pub mod tasks;
