/// Enhancement module
///
/// This module owns the remote AI restoration call:
/// - Quality tiers and their prompt templates (prompts.rs)
/// - The Gemini generateContent client and response parsing (client.rs)

pub mod client;
pub mod prompts;
