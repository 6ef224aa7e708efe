// src/mockllm/mod.rs

pub mod agent;
pub mod capabilities;
pub mod clients;
pub mod completion_client;
pub mod config;
pub mod error;
pub mod event;

// Let's explicitly export Agent so we don't have to access it via mockllm::agent::Agent
pub use agent::Agent;
