/// Character API access module
///
/// This module handles:
/// - Paginated catalog searches with name/status filters
/// - Batch fetches of favorited characters by id
/// - Downloading card portraits
/// - Reconstructing the served page from the response's adjacent-page links

pub mod client;

pub use client::{CatalogClient, CatalogPage, FetchError};
