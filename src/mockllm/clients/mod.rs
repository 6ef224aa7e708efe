//! [`CompletionClient`](crate::completion_client::CompletionClient) implementations.
//!
//! Each submodule offers a concrete client conforming to the uniform completion contract.

pub mod mock;
