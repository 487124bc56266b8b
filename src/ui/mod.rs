/// UI widget helpers
///
/// This module builds the visual pieces of the browser:
/// - The character card grid (cards.rs)
/// - The stats tiles and pagination row (chrome.rs)

pub mod cards;
pub mod chrome;
