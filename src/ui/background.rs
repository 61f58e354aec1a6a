use iced::widget::{container, image, stack, Space};
use iced::{ContentFit, Element, Length};

use super::theme;
use crate::network::images::ImageVariant;
use crate::state::crossfade::BackgroundCrossfade;
use crate::state::images::ImageCache;
use crate::Message;

/// Full-bleed blurred backdrop with the crossfade applied
///
/// Layers, bottom to top: page color, previous image (opaque), current
/// image (fading in), legibility gradient.
pub fn view<'a>(crossfade: &BackgroundCrossfade, images: &ImageCache) -> Element<'a, Message> {
    let layers = crossfade.layers();

    let base = container(Space::new(Length::Fill, Length::Fill)).style(theme::page);
    let previous = layer(layers.previous, images, 1.0);
    let current = layer(layers.current, images, layers.current_opacity);
    let overlay = container(Space::new(Length::Fill, Length::Fill)).style(theme::backdrop_overlay);

    stack![base, previous, current, overlay]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Missing or failed images leave the layer empty
fn layer<'a>(url: Option<&str>, images: &ImageCache, opacity: f32) -> Element<'a, Message> {
    match url.and_then(|url| images.get(url, ImageVariant::Blurred)) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .opacity(opacity)
            .into(),
        None => Space::new(Length::Fill, Length::Fill).into(),
    }
}
