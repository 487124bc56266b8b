/// Catalog view state machine
///
/// The browser is always in exactly one of two modes: paginated browsing
/// with optional name/status filters, or the favorites view. All mode and
/// page changes go through the transition methods below, which return the
/// candidate state together with the fetch it requires; the update loop
/// commits the candidate only once that fetch succeeds. Nothing in here
/// performs I/O, so every transition is unit-testable.

use super::data::{Character, CharacterStatus, Stats};

/// Where the browser currently is
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// The paginated, filterable catalog
    Browsing {
        /// Current page, starting at 1
        page: u32,
        /// Name constraint, empty when unfiltered
        name_filter: String,
        /// Status constraint, None when unfiltered
        status_filter: Option<CharacterStatus>,
    },
    /// The non-paginated list of favorited characters
    FavoritesView,
}

/// The network request a transition requires
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPlan {
    /// No request; the transition renders from local state alone
    None,
    /// Paginated catalog search
    Search {
        page: u32,
        name: String,
        status: Option<CharacterStatus>,
    },
    /// Batch fetch of the favorited ids (never empty)
    Favorites(Vec<u32>),
}

/// A candidate state change and the fetch that must succeed to commit it
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: ViewState,
    pub fetch: FetchPlan,
}

impl ViewState {
    /// The state the browser starts in: page 1, no filters
    pub fn initial() -> Self {
        ViewState::Browsing {
            page: 1,
            name_filter: String::new(),
            status_filter: None,
        }
    }

    /// Submit a search with the given filters.
    ///
    /// Allowed from any state; always lands on page 1 of the results.
    pub fn submit_search(&self, name: &str, status: Option<CharacterStatus>) -> Transition {
        Transition {
            next: ViewState::Browsing {
                page: 1,
                name_filter: name.to_string(),
                status_filter: status,
            },
            fetch: FetchPlan::Search {
                page: 1,
                name: name.to_string(),
                status,
            },
        }
    }

    /// Advance one page, keeping the current filters.
    ///
    /// Only meaningful while browsing; the page number commits once the
    /// fetch succeeds, so a failed request leaves the old page for retry.
    pub fn page_forward(&self) -> Option<Transition> {
        match self {
            ViewState::Browsing {
                page,
                name_filter,
                status_filter,
            } => Some(Self::browse_to(page + 1, name_filter, *status_filter)),
            ViewState::FavoritesView => None,
        }
    }

    /// Go back one page, keeping the current filters.
    ///
    /// At page 1 there is nothing to go back to and no transition exists.
    pub fn page_backward(&self) -> Option<Transition> {
        match self {
            ViewState::Browsing {
                page,
                name_filter,
                status_filter,
            } if *page > 1 => Some(Self::browse_to(page - 1, name_filter, *status_filter)),
            _ => None,
        }
    }

    /// Switch between browsing and the favorites view.
    ///
    /// Entering with an empty set renders the empty-favorites screen
    /// without any request. Leaving resets the filters rather than
    /// restoring them and lands on page 1 of the unfiltered catalog.
    pub fn toggle_favorites_view(&self, favorite_ids: &[u32]) -> Transition {
        match self {
            ViewState::Browsing { .. } => Self::refresh_favorites(favorite_ids),
            ViewState::FavoritesView => Transition {
                next: ViewState::initial(),
                fetch: FetchPlan::Search {
                    page: 1,
                    name: String::new(),
                    status: None,
                },
            },
        }
    }

    /// (Re-)enter the favorites view for the given set.
    ///
    /// Also used after a favorite toggle while the view is already active,
    /// so removing the last visible favorite immediately re-renders the
    /// shrunk or empty set.
    pub fn refresh_favorites(favorite_ids: &[u32]) -> Transition {
        let fetch = if favorite_ids.is_empty() {
            FetchPlan::None
        } else {
            FetchPlan::Favorites(favorite_ids.to_vec())
        };

        Transition {
            next: ViewState::FavoritesView,
            fetch,
        }
    }

    fn browse_to(page: u32, name_filter: &str, status_filter: Option<CharacterStatus>) -> Transition {
        Transition {
            next: ViewState::Browsing {
                page,
                name_filter: name_filter.to_string(),
                status_filter,
            },
            fetch: FetchPlan::Search {
                page,
                name: name_filter.to_string(),
                status: status_filter,
            },
        }
    }
}

/// Pagination bounds derived from a search response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSummary {
    /// Page the provider actually served (may differ from the request)
    pub current_page: u32,
    /// Total pages for the active filter combination
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

/// What the pagination row shows
#[derive(Debug, Clone, PartialEq)]
pub enum Pager {
    /// "Page X of Y" with prev/next enabled per the summary
    Paginated(PaginationSummary),
    /// Favorites label with both controls disabled
    Favorites { count: usize },
    /// Both controls disabled, no label (startup and post-error)
    Disabled,
}

/// Everything the view paints for one catalog state
///
/// Rebuilt in full after every committed transition; the view never
/// reaches past it into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub characters: Vec<Character>,
    pub stats: Stats,
    pub pager: Pager,
}

impl Screen {
    /// The blank screen shown before the first fetch resolves
    pub fn startup() -> Self {
        Screen {
            characters: Vec::new(),
            stats: Stats::default(),
            pager: Pager::Disabled,
        }
    }

    /// A committed page of search results
    pub fn browsing(
        characters: Vec<Character>,
        pagination: PaginationSummary,
        favorites: usize,
    ) -> Self {
        Screen {
            stats: Stats::tally(&characters, favorites),
            characters,
            pager: Pager::Paginated(pagination),
        }
    }

    /// A committed favorites listing
    pub fn favorites(characters: Vec<Character>, favorites: usize) -> Self {
        Screen {
            stats: Stats::tally(&characters, favorites),
            pager: Pager::Favorites {
                count: characters.len(),
            },
            characters,
        }
    }

    /// The favorites view with nothing in the set
    pub fn empty_favorites() -> Self {
        Screen {
            characters: Vec::new(),
            stats: Stats::default(),
            pager: Pager::Favorites { count: 0 },
        }
    }

    /// The cleared screen shown alongside an error banner
    pub fn cleared(favorites: usize) -> Self {
        Screen {
            characters: Vec::new(),
            stats: Stats::tally(&[], favorites),
            pager: Pager::Disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browsing(page: u32, name: &str, status: Option<CharacterStatus>) -> ViewState {
        ViewState::Browsing {
            page,
            name_filter: name.to_string(),
            status_filter: status,
        }
    }

    #[test]
    fn test_initial_state_is_unfiltered_page_one() {
        assert_eq!(ViewState::initial(), browsing(1, "", None));
    }

    #[test]
    fn test_submit_search_lands_on_page_one() {
        let state = browsing(7, "rick", Some(CharacterStatus::Alive));

        let t = state.submit_search("morty", Some(CharacterStatus::Dead));

        assert_eq!(t.next, browsing(1, "morty", Some(CharacterStatus::Dead)));
        assert_eq!(
            t.fetch,
            FetchPlan::Search {
                page: 1,
                name: "morty".to_string(),
                status: Some(CharacterStatus::Dead),
            }
        );
    }

    #[test]
    fn test_page_forward_keeps_filters() {
        let state = browsing(2, "rick", Some(CharacterStatus::Alive));

        let t = state.page_forward().unwrap();

        assert_eq!(t.next, browsing(3, "rick", Some(CharacterStatus::Alive)));
        assert_eq!(
            t.fetch,
            FetchPlan::Search {
                page: 3,
                name: "rick".to_string(),
                status: Some(CharacterStatus::Alive),
            }
        );
    }

    #[test]
    fn test_page_backward_at_page_one_is_a_noop() {
        let state = browsing(1, "rick", None);
        assert_eq!(state.page_backward(), None);
    }

    #[test]
    fn test_page_backward_decrements() {
        let state = browsing(3, "", None);

        let t = state.page_backward().unwrap();

        assert_eq!(t.next, browsing(2, "", None));
    }

    #[test]
    fn test_paging_is_unavailable_in_favorites_view() {
        assert_eq!(ViewState::FavoritesView.page_forward(), None);
        assert_eq!(ViewState::FavoritesView.page_backward(), None);
    }

    #[test]
    fn test_entering_favorites_with_empty_set_skips_the_network() {
        let t = ViewState::initial().toggle_favorites_view(&[]);

        assert_eq!(t.next, ViewState::FavoritesView);
        assert_eq!(t.fetch, FetchPlan::None);
    }

    #[test]
    fn test_entering_favorites_fetches_ids_in_order() {
        let t = browsing(4, "rick", None).toggle_favorites_view(&[3, 1, 2]);

        assert_eq!(t.next, ViewState::FavoritesView);
        assert_eq!(t.fetch, FetchPlan::Favorites(vec![3, 1, 2]));
    }

    #[test]
    fn test_leaving_favorites_resets_filters() {
        let t = ViewState::FavoritesView.toggle_favorites_view(&[1, 2]);

        assert_eq!(t.next, ViewState::initial());
        assert_eq!(
            t.fetch,
            FetchPlan::Search {
                page: 1,
                name: String::new(),
                status: None,
            }
        );
    }

    #[test]
    fn test_removing_last_favorite_refreshes_to_empty_screen() {
        // Toggling off the only visible favorite re-runs the favorites
        // entry with an empty set, which must render exactly the
        // empty-favorites screen.
        let t = ViewState::refresh_favorites(&[]);

        assert_eq!(t.next, ViewState::FavoritesView);
        assert_eq!(t.fetch, FetchPlan::None);
        assert_eq!(Screen::empty_favorites(), Screen::empty_favorites());
    }

    #[test]
    fn test_empty_favorites_screen_has_zero_stats_and_disabled_paging() {
        let screen = Screen::empty_favorites();

        assert!(screen.characters.is_empty());
        assert_eq!(screen.stats, Stats::default());
        assert_eq!(screen.pager, Pager::Favorites { count: 0 });
    }
}
