/// HTTP client for the public character API
///
/// All requests go through a shared `reqwest::Client`; the async methods
/// are driven from the update loop as background tasks and report back
/// through messages, so a slow response never blocks the UI.

use serde::Deserialize;
use thiserror::Error;

use crate::state::data::{Character, CharacterStatus};
use crate::state::view::PaginationSummary;

/// Base URL of the public character API
pub const API_URL: &str = "https://rickandmortyapi.com/api/character";

/// Failures surfaced by the catalog client.
///
/// The display strings double as the banner text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider answered with a non-success status. For searches this
    /// means the filter combination matched zero characters.
    #[error("No characters found. Try different filters!")]
    NotFound,
    /// Transport failure or a malformed response body
    #[error("Failed to load characters: {0}. Try again!")]
    Network(String),
}

/// A fetched page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub characters: Vec<Character>,
    pub pagination: PaginationSummary,
}

/// Search response envelope: one page of results plus paging metadata
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Character>,
    info: PageInfo,
}

/// Paging metadata; the provider gives adjacent-page links, not the
/// number of the page it actually served
#[derive(Debug, Deserialize)]
struct PageInfo {
    pages: u32,
    prev: Option<String>,
    next: Option<String>,
}

/// The batch endpoint returns a bare object for a single id and an
/// array for several
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Character>),
    One(Box<Character>),
}

impl From<OneOrMany> for Vec<Character> {
    fn from(body: OneOrMany) -> Self {
        match body {
            OneOrMany::Many(characters) => characters,
            OneOrMany::One(character) => vec![*character],
        }
    }
}

/// Client for the character API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client pointed at the public API
    pub fn new() -> Self {
        Self::with_base_url(API_URL)
    }

    /// Create a client pointed at an arbitrary base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one page of the catalog.
    ///
    /// Name and status constraints are only sent when non-empty; values
    /// are passed through exactly as received from the caller.
    pub async fn search(
        &self,
        page: u32,
        name: &str,
        status: Option<CharacterStatus>,
    ) -> Result<CatalogPage, FetchError> {
        let url = search_url(&self.base_url, page, name, status);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::NotFound);
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(CatalogPage {
            pagination: PaginationSummary {
                current_page: derive_current_page(body.info.prev.as_deref()),
                total_pages: body.info.pages,
                has_prev: body.info.prev.is_some(),
                has_next: body.info.next.is_some(),
            },
            characters: body.results,
        })
    }

    /// Fetch the given characters in one batch request.
    ///
    /// A single-object body (the single-id case) is normalized to a
    /// one-element list. Callers must not pass an empty slice; the state
    /// machine renders the empty-favorites screen without calling here.
    pub async fn fetch_by_ids(&self, ids: &[u32]) -> Result<Vec<Character>, FetchError> {
        debug_assert!(!ids.is_empty());

        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/{}", self.base_url, joined);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::NotFound);
        }

        let body: OneOrMany = response
            .json()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(body.into())
    }

    /// Download a character portrait as raw bytes
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::NotFound);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the search URL for a page and optional filters
fn search_url(base: &str, page: u32, name: &str, status: Option<CharacterStatus>) -> String {
    let mut url = format!("{}?page={}", base, page);

    if !name.is_empty() {
        url.push_str(&format!("&name={}", name));
    }
    if let Some(status) = status {
        url.push_str(&format!("&status={}", status));
    }

    url
}

/// Derive the page the provider actually served.
///
/// The served page is the `page` parameter of the `prev` link plus one;
/// with no `prev` link the provider is on page 1. The requested page
/// cannot be trusted here: out-of-range requests may be clamped
/// server-side.
fn derive_current_page(prev: Option<&str>) -> u32 {
    match prev {
        None => 1,
        Some(link) => reqwest::Url::parse(link)
            .ok()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == "page")
                    .and_then(|(_, value)| value.parse::<u32>().ok())
            })
            .map(|prev_page| prev_page + 1)
            .unwrap_or(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_has_no_prev_link() {
        assert_eq!(derive_current_page(None), 1);
    }

    #[test]
    fn test_current_page_is_prev_link_page_plus_one() {
        let prev = "https://rickandmortyapi.com/api/character/?name=rick&page=2";
        assert_eq!(derive_current_page(Some(prev)), 3);
    }

    #[test]
    fn test_prev_link_without_page_parameter_defaults_to_one() {
        let prev = "https://rickandmortyapi.com/api/character/?name=rick";
        assert_eq!(derive_current_page(Some(prev)), 1);
    }

    #[test]
    fn test_search_url_omits_empty_filters() {
        let url = search_url(API_URL, 1, "", None);
        assert_eq!(url, "https://rickandmortyapi.com/api/character?page=1");
    }

    #[test]
    fn test_search_url_appends_filters_as_given() {
        let url = search_url(API_URL, 3, "rick", Some(CharacterStatus::Unknown));
        assert_eq!(
            url,
            "https://rickandmortyapi.com/api/character?page=3&name=rick&status=unknown"
        );
    }

    /// Character body in the provider's wire shape, extra fields included
    fn character_json(id: u32) -> String {
        format!(
            r#"{{
                "id": {id},
                "name": "Rick Sanchez",
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Male",
                "origin": {{"name": "Earth (C-137)", "url": ""}},
                "location": {{"name": "Citadel of Ricks", "url": ""}},
                "image": "https://rickandmortyapi.com/api/character/avatar/{id}.jpeg",
                "episode": [],
                "url": "",
                "created": "2017-11-04T18:48:46.250Z"
            }}"#
        )
    }

    #[test]
    fn test_single_object_body_normalizes_to_one_element() {
        let body: OneOrMany = serde_json::from_str(&character_json(1)).unwrap();

        let characters: Vec<Character> = body.into();

        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].id, 1);
        assert_eq!(characters[0].origin.name, "Earth (C-137)");
    }

    #[test]
    fn test_array_body_keeps_its_order() {
        let json = format!("[{},{}]", character_json(2), character_json(1));
        let body: OneOrMany = serde_json::from_str(&json).unwrap();

        let characters: Vec<Character> = body.into();

        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].id, 2);
        assert_eq!(characters[1].id, 1);
    }

    #[test]
    fn test_search_envelope_decodes_paging_metadata() {
        let json = format!(
            r#"{{
                "info": {{"count": 1, "pages": 5, "next": "https://rickandmortyapi.com/api/character/?page=4", "prev": "https://rickandmortyapi.com/api/character/?page=2"}},
                "results": [{}]
            }}"#,
            character_json(1)
        );

        let body: SearchResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(body.info.pages, 5);
        assert_eq!(derive_current_page(body.info.prev.as_deref()), 3);
        assert!(body.info.next.is_some());
    }
}
