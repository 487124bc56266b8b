/// Stats tiles and pagination row
///
/// Both render purely from the current `Screen`; the pagination buttons
/// emit their messages only while the pager says a neighbor page exists,
/// so "back" on page 1 simply has no button to press.

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::state::data::Stats;
use crate::state::view::Pager;
use crate::Message;

/// The four stat tiles above the grid
pub fn stats_row(stats: &Stats) -> Element<'static, Message> {
    row![
        stat_tile("Total", stats.total),
        stat_tile("Alive", stats.alive),
        stat_tile("Dead", stats.dead),
        stat_tile("Favorites", stats.favorites),
    ]
    .spacing(32)
    .into()
}

fn stat_tile(label: &'static str, value: usize) -> Element<'static, Message> {
    column![
        text(value.to_string()).size(28),
        text(label).size(13).style(text::secondary),
    ]
    .align_x(Alignment::Center)
    .into()
}

/// Prev/next controls around the page label
pub fn pagination_row(pager: &Pager) -> Element<'static, Message> {
    let (label, has_prev, has_next) = match pager {
        Pager::Paginated(summary) => (
            format!("Page {} of {}", summary.current_page, summary.total_pages),
            summary.has_prev,
            summary.has_next,
        ),
        Pager::Favorites { count: 0 } => ("Favorites".to_string(), false, false),
        Pager::Favorites { count } => (format!("{} favorite(s)", count), false, false),
        Pager::Disabled => (String::new(), false, false),
    };

    row![
        button(text("← Prev")).on_press_maybe(has_prev.then_some(Message::PrevPage)),
        container(text(label).size(15))
            .width(Length::Fill)
            .center_x(Length::Fill),
        button(text("Next →")).on_press_maybe(has_next.then_some(Message::NextPage)),
    ]
    .align_y(Alignment::Center)
    .spacing(12)
    .into()
}
