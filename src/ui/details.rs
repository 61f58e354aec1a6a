use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Alignment, ContentFit, Element, Length};

use super::theme;
use crate::network::images::{image_url, ImageSize, ImageVariant};
use crate::state::data::Movie;
use crate::state::images::ImageCache;
use crate::Message;

const BACKDROP_HEIGHT: f32 = 320.0;

/// Full information for the selected movie
pub fn view<'a>(movie: &Movie, images: &ImageCache, image_base: &str) -> Element<'a, Message> {
    let backdrop: Element<'a, Message> = match backdrop_url(image_base, movie)
        .and_then(|url| images.get(&url, ImageVariant::Sharp).cloned())
    {
        Some(handle) => image(handle)
            .width(Length::Fill)
            .height(Length::Fixed(BACKDROP_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fill, Length::Fixed(BACKDROP_HEIGHT)))
            .style(theme::placeholder)
            .into(),
    };

    let poster = super::poster(image_base, movie, ImageSize::W342, images, 200.0, 300.0);

    let mut facts = column![text(movie.title.clone()).size(36)].spacing(8);

    if let Some(original) = movie.original_title.as_ref().filter(|t| **t != movie.title) {
        facts = facts.push(text(original.clone()).size(18));
    }
    if let Some(year) = movie.release_year() {
        facts = facts.push(text(format!("Released {} ({})", year, movie.release_date)).size(16));
    }
    facts = facts
        .push(
            text(format!(
                "★ {:.1}/10 from {} votes · popularity {:.0}",
                movie.vote_average, movie.vote_count, movie.popularity
            ))
            .size(16),
        )
        .push(text(overview(movie)).size(16));

    let content = column![
        row![
            button(text("← Back")).on_press(Message::Back).padding(10),
            Space::with_width(Length::Fill),
        ],
        backdrop,
        row![poster, facts.width(Length::Fill)]
            .spacing(24)
            .align_y(Alignment::Start),
    ]
    .spacing(20)
    .padding(24);

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::page)
        .into()
}

pub fn backdrop_url(image_base: &str, movie: &Movie) -> Option<String> {
    image_url(image_base, ImageSize::W780, movie.backdrop_path.as_deref())
}

fn overview(movie: &Movie) -> String {
    if movie.overview.trim().is_empty() {
        "No overview available.".to_string()
    } else {
        movie.overview.clone()
    }
}
