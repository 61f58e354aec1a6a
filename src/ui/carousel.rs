use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, column, container, image, mouse_area, row, scrollable, text, Row, Space,
};
use iced::{Alignment, ContentFit, Element, Length, Padding, Radians, Rotation};

use super::theme;
use crate::network::images::{ImageSize, ImageVariant};
use crate::state::carousel::{CarouselController, ItemStyle, CONTENT_PADDING, PAGE_WIDTH};
use crate::state::data::{Category, Movie};
use crate::state::images::ImageCache;
use crate::Message;

pub const POSTER_HEIGHT: f32 = 300.0;

/// Vertical room for unfocused posters sliding down
const DROP_ROOM: f32 = 30.0;

pub fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("popular-carousel")
}

/// The horizontally paged "Popular" carousel
///
/// `viewport_width` sizes the trailing space so the last poster can still be
/// scrolled under the snap point.
pub fn view<'a>(
    movies: &[Movie],
    carousel: &CarouselController,
    images: &ImageCache,
    image_base: &str,
    viewport_width: f32,
) -> Element<'a, Message> {
    let heading = text(Category::Popular.title()).size(28);

    let pages = movies
        .iter()
        .enumerate()
        .fold(Row::new(), |pages, (index, movie)| {
            let style = carousel.item_style(index);
            pages.push(page(index, movie, style, images, image_base))
        })
        .push(Space::with_width(Length::Fixed(
            (viewport_width - CONTENT_PADDING - PAGE_WIDTH).max(0.0),
        )))
        .padding(Padding {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: CONTENT_PADDING,
        });

    let pager = scrollable(pages)
        .id(scroll_id())
        .direction(Direction::Horizontal(Scrollbar::new().width(0.0).scroller_width(0.0)))
        .on_scroll(Message::CarouselScrolled)
        .width(Length::Fill);

    let arrows = row![
        button(text("‹").size(24)).on_press(Message::CarouselStep(-1)).padding(8),
        Space::with_width(Length::Fill),
        button(text("›").size(24)).on_press(Message::CarouselStep(1)).padding(8),
    ]
    .align_y(Alignment::Center)
    .padding(8);

    column![
        container(heading).width(Length::Fill).center_x(Length::Fill).padding(8),
        pager,
        arrows,
    ]
    .width(Length::Fill)
    .into()
}

fn page<'a>(
    index: usize,
    movie: &Movie,
    style: ItemStyle,
    images: &ImageCache,
    image_base: &str,
) -> Element<'a, Message> {
    let width = PAGE_WIDTH * style.scale;
    let height = POSTER_HEIGHT * style.scale;

    let handle = super::poster_url(image_base, movie, ImageSize::W500)
        .and_then(|url| images.get(&url, ImageVariant::Sharp).cloned());

    let poster: Element<'a, Message> = match handle {
        Some(handle) => image(handle)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .rotation(Rotation::Floating(Radians(style.rotation.to_radians())))
            .opacity(style.alpha)
            .into(),
        None => container(Space::new(Length::Fixed(width), Length::Fixed(height)))
            .style(theme::placeholder)
            .into(),
    };

    let slot = container(poster)
        .center_x(Length::Fixed(PAGE_WIDTH))
        .height(Length::Fixed(POSTER_HEIGHT + DROP_ROOM))
        .padding(Padding {
            top: style.drop,
            right: 0.0,
            bottom: DROP_ROOM - style.drop,
            left: 0.0,
        });

    mouse_area(slot)
        .on_press(Message::MovieSelected(Category::Popular, index))
        .into()
}
