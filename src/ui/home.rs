use iced::widget::{column, container, scrollable, stack, Column, Space};
use iced::{Element, Length};

use super::{background, carousel, grid, theme};
use crate::state::catalog::CatalogScreen;
use crate::state::data::Category;
use crate::state::images::ImageCache;
use crate::Message;

/// Space above the carousel that lets the backdrop show through
const BACKDROP_REVEAL: f32 = 240.0;

/// The catalog page: crossfading backdrop under a scrolling column holding
/// the popular carousel and the three grids.
pub fn view<'a>(
    screen: &CatalogScreen,
    images: &ImageCache,
    viewport_width: f32,
) -> Element<'a, Message> {
    let image_base = screen.image_base();

    let popular = carousel::view(
        screen.section(Category::Popular).movies(),
        screen.carousel(),
        images,
        image_base,
        viewport_width,
    );

    let grids = [Category::NowPlaying, Category::TopRated, Category::Upcoming]
        .into_iter()
        .fold(Column::new(), |grids, category| {
            grids.push(grid::view(screen.section(category), images, image_base))
        });

    let content = column![
        Space::with_height(Length::Fixed(BACKDROP_REVEAL)),
        popular,
        container(grids).width(Length::Fill).style(theme::grid_backdrop),
    ]
    .width(Length::Fill);

    stack![
        background::view(screen.crossfade(), images),
        scrollable(content).width(Length::Fill).height(Length::Fill),
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
