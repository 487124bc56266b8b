/// State management module
///
/// This module handles all application state, including:
/// - The shared character data model (data.rs)
/// - The persisted favorites set (favorites.rs)
/// - The view state machine and render state (view.rs)

pub mod data;
pub mod favorites;
pub mod view;
