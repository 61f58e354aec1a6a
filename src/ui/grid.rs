use iced::widget::{column, mouse_area, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::network::images::ImageSize;
use crate::state::catalog::{LoadStatus, Section};
use crate::state::images::ImageCache;
use crate::Message;

const TILE_WIDTH: f32 = 120.0;
const TILE_HEIGHT: f32 = 180.0;

/// A titled grid of posters for one static section
pub fn view<'a>(section: &Section, images: &ImageCache, image_base: &str) -> Element<'a, Message> {
    let heading = text(section.category.title()).size(22);

    let body: Element<'a, Message> = match (&section.status, section.list.is_empty()) {
        (LoadStatus::Failed(_), _) => text("Couldn't load this list.").size(14).into(),
        (LoadStatus::Loading, true) => text("Loading…").size(14).into(),
        (_, true) => text("Nothing here yet.").size(14).into(),
        _ => {
            let tiles: Vec<Element<'a, Message>> = section
                .movies()
                .iter()
                .enumerate()
                .map(|(index, movie)| {
                    let poster = super::poster(
                        image_base,
                        movie,
                        ImageSize::W342,
                        images,
                        TILE_WIDTH,
                        TILE_HEIGHT,
                    );
                    let caption = match movie.release_year() {
                        Some(year) => format!("{} ({})", movie.title, year),
                        None => movie.title.clone(),
                    };
                    let tile = column![poster, text(caption).size(12).width(Length::Fixed(TILE_WIDTH))]
                        .spacing(4);

                    mouse_area(tile)
                        .on_press(Message::MovieSelected(section.category, index))
                        .into()
                })
                .collect();

            Wrap::with_elements(tiles)
                .spacing(12.0)
                .line_spacing(16.0)
                .into()
        }
    };

    column![heading, body]
        .spacing(10)
        .padding(16)
        .width(Length::Fill)
        .into()
}
