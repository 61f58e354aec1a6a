//! The iced application: state, messages, update and subscriptions

use std::time::Duration;

use iced::keyboard::{self, key::Named, Key};
use iced::time::Instant;
use iced::widget::image::Handle;
use iced::widget::scrollable::{self, AbsoluteOffset, Viewport};
use iced::{window, Element, Subscription, Task, Theme};

use crate::config::AppConfig;
use crate::network::client::TmdbClient;
use crate::network::error::{CatalogError, ImageError};
use crate::network::images::{fetch_image, ImageSize, ImageVariant};
use crate::state::catalog::CatalogScreen;
use crate::state::data::{Category, MovieList};
use crate::state::images::ImageCache;
use crate::state::navigation::{Destination, NavigationEvent};
use crate::ui;

/// Window width assumed until the carousel reports its viewport
const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Quiet time after the last scroll event before the carousel snaps
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Main application state
pub struct MoviesApp {
    client: TmdbClient,
    /// The home screen model (sections, carousel, background)
    screen: CatalogScreen,
    images: ImageCache,
    destination: Destination,
    /// Width of the carousel viewport, from the last scroll event
    viewport_width: f32,
    /// Bumped on every carousel scroll, only the latest gesture settles
    scroll_generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// One catalog list finished loading
    CatalogLoaded(Category, Result<MovieList, CatalogError>),
    /// The popular carousel moved (user scroll or programmatic)
    CarouselScrolled(Viewport),
    /// No scroll event arrived for a while after the given gesture
    CarouselIdle(u64),
    /// Page the carousel by a number of items (arrows, keyboard)
    CarouselStep(isize),
    /// A poster was clicked in the carousel or a grid
    MovieSelected(Category, usize),
    Back,
    /// Animation frame while the background is fading
    Frame(Instant),
    ImageLoaded(String, ImageVariant, Result<Handle, ImageError>),
}

impl MoviesApp {
    /// Create a new instance of the application and start loading every list
    pub fn new(config: AppConfig, client: TmdbClient) -> (Self, Task<Message>) {
        let screen = CatalogScreen::new(config.image_base_url.clone(), config.crossfade_duration());

        tracing::info!("🎨 Movie browser initialized, loading {} lists", Category::ALL.len());

        // Each list loads on its own, whichever arrives first renders first
        let loads = Category::ALL.map(|category| {
            let client = client.clone();
            Task::perform(
                async move { client.fetch(category).await },
                move |result| Message::CatalogLoaded(category, result),
            )
        });

        (
            MoviesApp {
                client,
                screen,
                images: ImageCache::new(),
                destination: Destination::Home,
                viewport_width: DEFAULT_VIEWPORT_WIDTH,
                scroll_generation: 0,
            },
            Task::batch(loads),
        )
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();

        match message {
            Message::CatalogLoaded(category, result) => {
                self.screen.apply_load(category, result);
                self.request_images(now)
            }
            Message::CarouselScrolled(viewport) => {
                self.scrolled(viewport.absolute_offset().x, viewport.bounds().width, now)
            }
            Message::CarouselIdle(generation) => {
                if generation != self.scroll_generation
                    || self.destination != Destination::Home
                    || !self.screen.settle()
                {
                    return Task::none();
                }
                self.scroll_carousel()
            }
            Message::CarouselStep(delta) => {
                if self.destination != Destination::Home || !self.screen.step(delta) {
                    return Task::none();
                }
                Task::batch([self.scroll_carousel(), self.refresh_background(now)])
            }
            Message::MovieSelected(category, index) => match self.screen.select(category, index) {
                Some(event) => self.navigate(&event.route(), now),
                None => Task::none(),
            },
            Message::Back => self.navigate(&NavigationEvent::home().route(), now),
            Message::Frame(now) => {
                self.screen.tick(now);
                Task::none()
            }
            Message::ImageLoaded(url, variant, result) => {
                if variant == ImageVariant::Blurred && self.screen.layer_ready(&url, now) {
                    tracing::debug!("🎞️  Backdrop ready, fading in {}", url);
                }
                self.images.finish(url, variant, result);
                Task::none()
            }
        }
    }

    /// Track the carousel offset and schedule a snap for when scrolling stops
    fn scrolled(&mut self, offset_x: f32, viewport_width: f32, now: Instant) -> Task<Message> {
        self.viewport_width = viewport_width;
        self.scroll_generation = self.scroll_generation.wrapping_add(1);

        let generation = self.scroll_generation;
        let idle = Task::perform(
            async move {
                tokio::time::sleep(SETTLE_DELAY).await;
                generation
            },
            Message::CarouselIdle,
        );

        if self.screen.scrolled(offset_x) {
            Task::batch([idle, self.refresh_background(now)])
        } else {
            idle
        }
    }

    fn navigate(&mut self, route: &str, now: Instant) -> Task<Message> {
        match Destination::parse(route) {
            Ok(Destination::Home) => self.update_home(now),
            Ok(destination) => {
                if let Destination::Details(movie) = &destination {
                    tracing::info!("🎬 Opening details for {} ({})", movie.title, movie.id);
                }
                self.screen.unmount();
                self.destination = destination;
                self.request_images(now)
            }
            Err(err) => {
                tracing::warn!("⚠️  Ignoring navigation: {}", err);
                Task::none()
            }
        }
    }

    fn update_home(&mut self, now: Instant) -> Task<Message> {
        if self.destination == Destination::Home {
            return Task::none();
        }
        tracing::info!("🔙 Back to catalog");
        self.destination = Destination::Home;
        self.screen.remount();
        // The carousel widget was rebuilt at offset 0
        Task::batch([self.scroll_carousel(), self.request_images(now)])
    }

    fn scroll_carousel(&self) -> Task<Message> {
        scrollable::scroll_to(
            ui::carousel::scroll_id(),
            AbsoluteOffset {
                x: self.screen.carousel().scroll_offset(),
                y: 0.0,
            },
        )
    }

    /// Start downloads for every image the current screen can show
    fn request_images(&mut self, now: Instant) -> Task<Message> {
        let image_base = self.screen.image_base();

        let wanted: Vec<String> = match &self.destination {
            Destination::Home => self
                .screen
                .sections()
                .iter()
                .flat_map(|section| {
                    let size = match section.category {
                        Category::Popular => ImageSize::W500,
                        _ => ImageSize::W342,
                    };
                    section
                        .movies()
                        .iter()
                        .filter_map(move |movie| ui::poster_url(image_base, movie, size))
                })
                .collect(),
            Destination::Details(movie) => ui::details::backdrop_url(image_base, movie)
                .into_iter()
                .chain(ui::poster_url(image_base, movie, ImageSize::W342))
                .collect(),
        };

        let sharp = self.fetch_missing(
            wanted
                .into_iter()
                .map(|url| (url, ImageVariant::Sharp))
                .collect(),
        );

        if self.destination == Destination::Home {
            Task::batch([sharp, self.refresh_background(now)])
        } else {
            sharp
        }
    }

    /// Fetch the background layers and start a waiting fade whose image is
    /// already in the cache
    fn refresh_background(&mut self, now: Instant) -> Task<Message> {
        if let Some(url) = self.screen.pending_layer().map(str::to_string) {
            if self.images.is_settled(&url, ImageVariant::Blurred) {
                self.screen.layer_ready(&url, now);
            }
        }

        let layers = self.screen.crossfade().layers();
        let wanted = [layers.previous, layers.current]
            .into_iter()
            .flatten()
            .map(|url| (url.to_string(), ImageVariant::Blurred))
            .collect();

        self.fetch_missing(wanted)
    }

    fn fetch_missing(&mut self, wanted: Vec<(String, ImageVariant)>) -> Task<Message> {
        let fetches: Vec<Task<Message>> = wanted
            .into_iter()
            .filter(|(url, variant)| self.images.begin(url, *variant))
            .map(|(url, variant)| {
                let http = self.client.http().clone();
                Task::perform(fetch_image(http, url.clone(), variant), move |result| {
                    Message::ImageLoaded(url.clone(), variant, result)
                })
            })
            .collect();

        Task::batch(fetches)
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        match &self.destination {
            Destination::Home => ui::home::view(&self.screen, &self.images, self.viewport_width),
            Destination::Details(movie) => {
                ui::details::view(movie, &self.images, self.screen.image_base())
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(Named::ArrowLeft) => Some(Message::CarouselStep(-1)),
            Key::Named(Named::ArrowRight) => Some(Message::CarouselStep(1)),
            Key::Named(Named::Escape) | Key::Named(Named::Backspace) => Some(Message::Back),
            _ => None,
        });

        // Frames are only needed while a fade is running
        if self.screen.is_animating() {
            Subscription::batch([keys, window::frames().map(Message::Frame)])
        } else {
            keys
        }
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        ui::theme::theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::sample_movie;

    fn app() -> MoviesApp {
        let config = AppConfig::default();
        let client = TmdbClient::new(&config).unwrap();
        MoviesApp::new(config, client).0
    }

    fn popular() -> MovieList {
        MovieList {
            page: 1,
            results: vec![
                sample_movie(1, Some("/a.jpg")),
                sample_movie(2, Some("/b.jpg")),
                sample_movie(3, Some("/c.jpg")),
            ],
            total_pages: 1,
            total_results: 3,
        }
    }

    fn loaded() -> MoviesApp {
        let mut app = app();
        let _ = app.update(Message::CatalogLoaded(Category::Popular, Ok(popular())));
        app
    }

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255])
    }

    #[test]
    fn test_select_opens_details_and_unmounts_background() {
        let mut app = loaded();
        assert!(app.screen.crossfade().current().is_some());

        let _ = app.update(Message::MovieSelected(Category::Popular, 1));

        assert!(matches!(&app.destination, Destination::Details(movie) if movie.id == 2));
        assert_eq!(app.screen.crossfade().current(), None);
    }

    #[test]
    fn test_back_remounts_background() {
        let mut app = loaded();
        let _ = app.update(Message::MovieSelected(Category::Popular, 0));
        let _ = app.update(Message::Back);

        assert_eq!(app.destination, Destination::Home);
        assert!(app.screen.background_target().is_some());
        assert_eq!(
            app.screen.crossfade().current(),
            app.screen.background_target().as_deref()
        );
        assert!(!app.screen.is_animating());
    }

    #[test]
    fn test_step_ignored_on_details() {
        let mut app = loaded();
        let _ = app.update(Message::MovieSelected(Category::Popular, 0));

        let _ = app.update(Message::CarouselStep(1));
        assert_eq!(app.screen.carousel().focused(), Some(0));

        let _ = app.update(Message::Back);
        let _ = app.update(Message::CarouselStep(1));
        assert_eq!(app.screen.carousel().focused(), Some(1));
    }

    #[test]
    fn test_only_latest_scroll_settles() {
        let mut app = loaded();
        let now = Instant::now();

        let _ = app.scrolled(290.0, 1280.0, now);
        let _ = app.scrolled(290.0, 1280.0, now);
        assert_eq!(app.scroll_generation, 2);

        let _ = app.update(Message::CarouselIdle(1));
        assert!((app.screen.carousel().position() - 1.45).abs() < 1e-6);

        let _ = app.update(Message::CarouselIdle(2));
        assert_eq!(app.screen.carousel().position(), 1.0);
        assert_eq!(app.screen.carousel().focused(), Some(1));
    }

    #[test]
    fn test_fade_starts_when_backdrop_arrives() {
        let mut app = loaded();
        let _ = app.update(Message::CarouselStep(1));

        let url = app.screen.pending_layer().unwrap().to_string();
        assert!(!app.screen.is_animating());

        // A poster of the same movie does not count
        let _ = app.update(Message::ImageLoaded(url.clone(), ImageVariant::Sharp, Ok(pixel())));
        assert!(!app.screen.is_animating());

        let _ = app.update(Message::ImageLoaded(url, ImageVariant::Blurred, Ok(pixel())));
        assert!(app.screen.is_animating());
        assert!(app.screen.crossfade().previous().is_some());
    }

    #[test]
    fn test_cached_backdrop_fades_right_away() {
        let mut app = loaded();
        let first = app.screen.background_target().unwrap();
        let _ = app.update(Message::ImageLoaded(first, ImageVariant::Blurred, Ok(pixel())));

        let _ = app.update(Message::CarouselStep(1));
        let second = app.screen.pending_layer().unwrap().to_string();
        let _ = app.update(Message::ImageLoaded(second, ImageVariant::Blurred, Ok(pixel())));

        // Back to the first backdrop, which is already loaded
        let _ = app.update(Message::Frame(Instant::now() + Duration::from_secs(2)));
        let _ = app.update(Message::CarouselStep(-1));
        assert!(app.screen.is_animating());
        assert_eq!(app.screen.pending_layer(), None);
    }

    #[test]
    fn test_scrolling_requests_only_backdrops() {
        let mut app = app();
        app.screen.apply_load(Category::Popular, Ok(popular()));
        let now = Instant::now();

        let _ = app.scrolled(210.0, 1280.0, now);

        let image_base = app.screen.image_base().to_string();
        let backdrop = app.screen.pending_layer().unwrap().to_string();
        let poster = ui::poster_url(&image_base, &sample_movie(2, None), ImageSize::W500).unwrap();

        // Claimed by the scroll, so a second claim is refused
        assert!(!app.images.begin(&backdrop, ImageVariant::Blurred));
        assert!(app.images.begin(&poster, ImageVariant::Sharp));
    }
}
