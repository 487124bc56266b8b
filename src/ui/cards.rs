/// Character card grid
///
/// Each card shows the portrait, name, status badge and the detail lines,
/// plus a heart button that toggles the favorite. The heart carries the
/// character id in its message, so the handler never has to recover the
/// clicked element from ambient context.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::state::data::{Character, CharacterStatus};
use crate::state::favorites::Favorites;
use crate::Message;

/// Fixed card width so the grid wraps evenly
const CARD_WIDTH: f32 = 300.0;

/// Portrait edge length inside a card (square)
const PORTRAIT_SIZE: f32 = 96.0;

/// Lay the cards out in a wrapping grid
pub fn card_grid<'a>(
    characters: &'a [Character],
    favorites: &Favorites,
    avatars: &HashMap<u32, Handle>,
) -> Element<'a, Message> {
    let cards = characters
        .iter()
        .map(|character| {
            character_card(
                character,
                favorites.is_favorite(character.id),
                avatars.get(&character.id),
            )
        })
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

/// Build one character card
pub fn character_card<'a>(
    character: &'a Character,
    is_favorite: bool,
    avatar: Option<&Handle>,
) -> Element<'a, Message> {
    let portrait: Element<'a, Message> = match avatar {
        Some(handle) => image(handle.clone())
            .width(PORTRAIT_SIZE)
            .height(PORTRAIT_SIZE)
            .into(),
        // Portrait still downloading (or failed); keep the slot size stable
        None => container(text("👽").size(32))
            .width(PORTRAIT_SIZE)
            .height(PORTRAIT_SIZE)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into(),
    };

    let heart_icon = if is_favorite { "♥" } else { "♡" };
    let heart = button(text(heart_icon).size(22))
        .style(button::text)
        .on_press(Message::FavoriteToggled(character.id));

    let details = column![
        text(character.name.as_str()).size(18),
        status_badge(character.status),
        info_line("Species:", character.species.as_str()),
        info_line("Gender:", character.gender.as_str()),
        info_line("Origin:", character.origin.name.as_str()),
        info_line("Location:", character.location.name.as_str()),
    ]
    .spacing(4);

    let body = row![portrait, details.width(Length::Fill), heart]
        .spacing(12)
        .align_y(Alignment::Start);

    container(body)
        .style(container::rounded_box)
        .width(CARD_WIDTH)
        .padding(12)
        .into()
}

/// Colored status marker
fn status_badge(status: CharacterStatus) -> Element<'static, Message> {
    let label = text(format!("● {}", status)).size(14);

    match status {
        CharacterStatus::Alive => label.style(text::success),
        CharacterStatus::Dead => label.style(text::danger),
        CharacterStatus::Unknown => label.style(text::secondary),
    }
    .into()
}

/// One label/value line inside a card
fn info_line<'a>(label: &'static str, value: &'a str) -> Element<'a, Message> {
    row![
        text(label).size(13).style(text::secondary),
        text(value).size(13),
    ]
    .spacing(6)
    .into()
}
