//! View layer
//!
//! Pure functions from application state to widget trees. Events go back to
//! `update` as `Message`s.

use iced::widget::{container, image, Space};
use iced::{ContentFit, Element, Length};

use crate::network::images::{image_url, ImageSize, ImageVariant};
use crate::state::data::Movie;
use crate::state::images::ImageCache;
use crate::Message;

pub mod background;
pub mod carousel;
pub mod details;
pub mod grid;
pub mod home;
pub mod theme;

/// Poster URL for a movie at the given size
pub fn poster_url(image_base: &str, movie: &Movie, size: ImageSize) -> Option<String> {
    image_url(image_base, size, movie.poster_path.as_deref())
}

/// A poster, or a flat placeholder while it loads or if it has none
pub fn poster<'a>(
    image_base: &str,
    movie: &Movie,
    size: ImageSize,
    images: &ImageCache,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let handle = poster_url(image_base, movie, size)
        .and_then(|url| images.get(&url, ImageVariant::Sharp).cloned());

    match handle {
        Some(handle) => image(handle)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fixed(width), Length::Fixed(height)))
            .style(theme::placeholder)
            .into(),
    }
}
