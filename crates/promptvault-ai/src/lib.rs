//! # PromptVault AI
//!
//! Optional AI assistance for PromptVault, backed by the Gemini
//! `generateContent` REST API.
//!
//! - [`GeminiClient`]: thin HTTP client with timeout and API-key header
//! - [`Assistant`]: suggestions and auto-categorization that never fail;
//!   errors degrade to a placeholder message or no result

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assistant;
pub mod client;
pub mod prompts;

pub use assistant::{Assistant, Categorization, UNAVAILABLE_MESSAGE};
pub use client::{ClientError, GeminiClient, GeminiConfig};
