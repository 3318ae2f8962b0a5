/// State management module
///
/// This module handles all application state, including:
/// - Loaded and enhanced image data (image.rs)
/// - The upload → preview → enhance → compare state machine (app.rs)

pub mod app;
pub mod image;
