use iced::widget::image::Handle;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input};
use iced::{Element, Length, Task, Theme};
use std::collections::HashMap;
use std::fmt;

mod api;
mod state;
mod ui;

use api::{CatalogClient, CatalogPage, FetchError};
use state::data::{Character, CharacterStatus};
use state::favorites::Favorites;
use state::view::{FetchPlan, Screen, Transition, ViewState};

/// Status filter choices offered by the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusChoice {
    Any,
    Alive,
    Dead,
    Unknown,
}

impl StatusChoice {
    const ALL: [StatusChoice; 4] = [
        StatusChoice::Any,
        StatusChoice::Alive,
        StatusChoice::Dead,
        StatusChoice::Unknown,
    ];

    /// The constraint this choice puts on a search (None = unfiltered)
    fn filter(self) -> Option<CharacterStatus> {
        match self {
            StatusChoice::Any => None,
            StatusChoice::Alive => Some(CharacterStatus::Alive),
            StatusChoice::Dead => Some(CharacterStatus::Dead),
            StatusChoice::Unknown => Some(CharacterStatus::Unknown),
        }
    }
}

impl fmt::Display for StatusChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusChoice::Any => write!(f, "All statuses"),
            StatusChoice::Alive => write!(f, "Alive"),
            StatusChoice::Dead => write!(f, "Dead"),
            StatusChoice::Unknown => write!(f, "unknown"),
        }
    }
}

/// Main application state
struct CharacterBrowser {
    /// The persisted favorites set
    favorites: Favorites,
    /// API client shared by all fetch tasks
    client: CatalogClient,
    /// Committed view state; only replaced when a fetch succeeds
    view: ViewState,
    /// What the window currently shows
    screen: Screen,
    /// Contents of the search box
    search_query: String,
    /// Current dropdown selection
    status_choice: StatusChoice,
    /// Portrait cache by character id
    avatars: HashMap<u32, Handle>,
    /// True while a catalog fetch is in flight
    loading: bool,
    /// Banner text for the last failure, cleared by the next action
    error: Option<String>,
    /// One-line status message under the controls
    status: String,
    /// Sequence number of the most recently issued catalog fetch
    fetch_seq: u64,
    /// Candidate state waiting for its fetch result, tagged with the
    /// sequence number of that fetch
    pending: Option<(u64, ViewState)>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed in the search box
    SearchInputChanged(String),
    /// User picked a status filter
    StatusPicked(StatusChoice),
    /// User submitted the search (button or Enter)
    SearchSubmitted,
    /// User clicked the previous-page control
    PrevPage,
    /// User clicked the next-page control
    NextPage,
    /// User toggled the favorites view on or off
    FavoritesViewToggled,
    /// User clicked the heart on the card with this character id
    FavoriteToggled(u32),
    /// User asked for a JSON export of the rendered list
    ExportRequested,
    /// Background export completed with (count, path) or an error
    ExportFinished(Result<(usize, String), String>),
    /// A catalog search resolved
    CatalogLoaded(u64, Result<CatalogPage, FetchError>),
    /// A favorites batch fetch resolved
    FavoritesLoaded(u64, Result<Vec<Character>, FetchError>),
    /// A portrait download resolved
    AvatarFetched(u32, Result<Vec<u8>, FetchError>),
}

impl CharacterBrowser {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let favorites = Favorites::load();
        println!(
            "🛸 Character browser initialized with {} favorite(s)",
            favorites.count()
        );

        let mut app = CharacterBrowser {
            favorites,
            client: CatalogClient::new(),
            view: ViewState::initial(),
            screen: Screen::startup(),
            search_query: String::new(),
            status_choice: StatusChoice::Any,
            avatars: HashMap::new(),
            loading: false,
            error: None,
            status: String::new(),
            fetch_seq: 0,
            pending: None,
        };

        // Load page 1 of the unfiltered catalog on startup
        let task = app.apply(ViewState::initial().submit_search("", None));
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchInputChanged(query) => {
                self.search_query = query;
                Task::none()
            }
            Message::StatusPicked(choice) => {
                self.status_choice = choice;
                Task::none()
            }
            Message::SearchSubmitted => {
                let name = self.search_query.trim().to_string();
                let transition = self.view.submit_search(&name, self.status_choice.filter());
                self.apply(transition)
            }
            Message::NextPage => match self.view.page_forward() {
                Some(transition) => self.apply(transition),
                None => Task::none(),
            },
            Message::PrevPage => match self.view.page_backward() {
                Some(transition) => self.apply(transition),
                None => Task::none(),
            },
            Message::FavoritesViewToggled => {
                let transition = self.view.toggle_favorites_view(self.favorites.ids());
                if matches!(transition.next, ViewState::Browsing { .. }) {
                    // Leaving favorites resets the filter inputs along
                    // with the view state; they are not restored
                    self.search_query.clear();
                    self.status_choice = StatusChoice::Any;
                }
                self.apply(transition)
            }
            Message::FavoriteToggled(id) => self.toggle_favorite(id),
            Message::ExportRequested => {
                self.status = "Exporting...".to_string();
                Task::perform(
                    export_characters(self.screen.characters.clone()),
                    Message::ExportFinished,
                )
            }
            Message::ExportFinished(result) => {
                match result {
                    Ok((count, path)) => {
                        self.status = format!("Exported {} character(s) to {}", count, path);
                        println!("📦 {}", self.status);
                    }
                    Err(e) => {
                        eprintln!("❌ Export failed: {}", e);
                        self.error = Some(format!("Export failed: {}", e));
                        self.status.clear();
                    }
                }
                Task::none()
            }
            Message::CatalogLoaded(seq, result) => self.catalog_loaded(seq, result),
            Message::FavoritesLoaded(seq, result) => self.favorites_loaded(seq, result),
            Message::AvatarFetched(id, result) => {
                match result {
                    Ok(bytes) => {
                        self.avatars.insert(id, Handle::from_bytes(bytes));
                    }
                    Err(e) => {
                        eprintln!("⚠️  Portrait download failed for character {}: {}", id, e);
                    }
                }
                Task::none()
            }
        }
    }

    /// Start a transition: commit it locally when it needs no fetch,
    /// otherwise issue the fetch and stash the candidate state until
    /// the tagged response comes back.
    fn apply(&mut self, transition: Transition) -> Task<Message> {
        self.error = None;

        match transition.fetch {
            FetchPlan::None => {
                // Favorites view with an empty set: render locally,
                // no network call
                self.view = transition.next;
                self.pending = None;
                self.loading = false;
                self.screen = Screen::empty_favorites();
                self.error = Some("You don't have any favorites yet! ⭐".to_string());
                self.status.clear();
                Task::none()
            }
            FetchPlan::Search { page, name, status } => {
                self.loading = true;
                self.status = "Loading characters...".to_string();
                let seq = self.next_seq();
                self.pending = Some((seq, transition.next));

                let client = self.client.clone();
                Task::perform(
                    async move { client.search(page, &name, status).await },
                    move |result| Message::CatalogLoaded(seq, result),
                )
            }
            FetchPlan::Favorites(ids) => {
                self.loading = true;
                self.status = "Loading favorites...".to_string();
                let seq = self.next_seq();
                self.pending = Some((seq, transition.next));

                let client = self.client.clone();
                Task::perform(
                    async move { client.fetch_by_ids(&ids).await },
                    move |result| Message::FavoritesLoaded(seq, result),
                )
            }
        }
    }

    /// A search response arrived
    fn catalog_loaded(
        &mut self,
        seq: u64,
        result: Result<CatalogPage, FetchError>,
    ) -> Task<Message> {
        let next = match self.take_pending(seq) {
            Some(next) => next,
            None => return Task::none(),
        };

        self.loading = false;

        match result {
            Ok(page) => {
                self.view = next;
                self.status = format!("Showing {} character(s)", page.characters.len());
                self.screen =
                    Screen::browsing(page.characters, page.pagination, self.favorites.count());
                self.fetch_missing_avatars()
            }
            Err(e) => self.fetch_failed(e),
        }
    }

    /// A favorites batch response arrived
    fn favorites_loaded(
        &mut self,
        seq: u64,
        result: Result<Vec<Character>, FetchError>,
    ) -> Task<Message> {
        let next = match self.take_pending(seq) {
            Some(next) => next,
            None => return Task::none(),
        };

        self.loading = false;

        match result {
            Ok(characters) => {
                self.view = next;
                self.status = format!("Showing {} favorite(s)", characters.len());
                self.screen = Screen::favorites(characters, self.favorites.count());
                self.fetch_missing_avatars()
            }
            Err(e) => self.fetch_failed(e),
        }
    }

    /// Drop the candidate state, show the banner and clear the list;
    /// the committed view state stays what it was before the action.
    fn fetch_failed(&mut self, error: FetchError) -> Task<Message> {
        eprintln!("❌ Fetch failed: {}", error);
        self.error = Some(error.to_string());
        self.status.clear();
        self.screen = Screen::cleared(self.favorites.count());
        Task::none()
    }

    /// Claim the pending candidate if this response is the latest fetch;
    /// a response from a superseded fetch is discarded.
    fn take_pending(&mut self, seq: u64) -> Option<ViewState> {
        match self.pending.take() {
            Some((pending_seq, next)) if pending_seq == seq => Some(next),
            stale_or_none => {
                self.pending = stale_or_none;
                None
            }
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Flip a favorite and, while the favorites view is active, re-run
    /// its fetch so the visible list shrinks or empties immediately.
    fn toggle_favorite(&mut self, id: u32) -> Task<Message> {
        if self.favorites.is_favorite(id) {
            self.favorites.remove(id);
            println!("💔 Removed character {} from favorites", id);
        } else {
            self.favorites.add(id);
            println!("⭐ Added character {} to favorites", id);
        }

        if matches!(self.view, ViewState::FavoritesView) {
            let transition = ViewState::refresh_favorites(self.favorites.ids());
            self.apply(transition)
        } else {
            self.screen.stats.favorites = self.favorites.count();
            Task::none()
        }
    }

    /// Download portraits the cache does not have yet.
    ///
    /// Results land in the cache keyed by character id, so late arrivals
    /// from a page the user already left are harmless.
    fn fetch_missing_avatars(&self) -> Task<Message> {
        let mut tasks = Vec::new();

        for character in &self.screen.characters {
            if self.avatars.contains_key(&character.id) {
                continue;
            }

            let client = self.client.clone();
            let id = character.id;
            let url = character.image.clone();
            tasks.push(Task::perform(
                async move { client.fetch_image(&url).await },
                move |result| Message::AvatarFetched(id, result),
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let favorites_label = if matches!(self.view, ViewState::FavoritesView) {
            "Back to catalog".to_string()
        } else {
            format!("♥ Favorites ({})", self.favorites.count())
        };

        let controls = row![
            text_input("Search by name...", &self.search_query)
                .on_input(Message::SearchInputChanged)
                .on_submit(Message::SearchSubmitted)
                .width(Length::Fill),
            pick_list(
                StatusChoice::ALL,
                Some(self.status_choice),
                Message::StatusPicked
            ),
            button(text("Search")).on_press(Message::SearchSubmitted),
            button(text(favorites_label)).on_press(Message::FavoritesViewToggled),
            button(text("Export")).on_press_maybe(
                (!self.screen.characters.is_empty()).then_some(Message::ExportRequested)
            ),
        ]
        .spacing(10);

        let banner: Element<Message> = if self.loading {
            text(self.status.as_str()).size(16).into()
        } else if let Some(error) = &self.error {
            text(error.as_str()).size(16).style(text::danger).into()
        } else {
            text(self.status.as_str())
                .size(14)
                .style(text::secondary)
                .into()
        };

        let content = column![
            text("Character Browser").size(32),
            controls,
            ui::chrome::stats_row(&self.screen.stats),
            banner,
            scrollable(ui::cards::card_grid(
                &self.screen.characters,
                &self.favorites,
                &self.avatars
            ))
            .height(Length::Fill),
            ui::chrome::pagination_row(&self.screen.pager),
        ]
        .spacing(16)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Character Browser",
        CharacterBrowser::update,
        CharacterBrowser::view,
    )
    .theme(CharacterBrowser::theme)
    .centered()
    .run_with(CharacterBrowser::new)
}

/// Async function to write the rendered list to the data directory as JSON
/// Runs in the background to keep the UI responsive
async fn export_characters(characters: Vec<Character>) -> Result<(usize, String), String> {
    let mut path = dirs::data_dir()
        .or_else(|| dirs::home_dir())
        .ok_or_else(|| "Could not determine user data directory".to_string())?;
    path.push("character-browser");

    tokio::fs::create_dir_all(&path)
        .await
        .map_err(|e| format!("Failed to create data directory: {}", e))?;
    path.push("export.json");

    let json = serde_json::to_string_pretty(&characters)
        .map_err(|e| format!("Failed to encode characters: {}", e))?;

    tokio::fs::write(&path, json)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    Ok((characters.len(), path.display().to_string()))
}
