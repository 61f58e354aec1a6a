//! The home screen model
//!
//! Four independently loaded sections, a focus-driven carousel over the
//! popular list and the background crossfade that follows it.

use std::time::{Duration, Instant};

use tokio::sync::watch;

use super::carousel::{CarouselController, PAGE_WIDTH};
use super::crossfade::BackgroundCrossfade;
use super::data::{Category, Movie, MovieList};
use super::navigation::NavigationEvent;
use crate::network::error::CatalogError;
use crate::network::images::{image_url, ImageSize};

/// Load state of one section
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Section {
    pub category: Category,
    pub status: LoadStatus,
    pub list: MovieList,
}

impl Section {
    fn new(category: Category) -> Self {
        Self {
            category,
            status: LoadStatus::Loading,
            list: MovieList::default(),
        }
    }

    /// Movies to render, empty until loaded
    pub fn movies(&self) -> &[Movie] {
        &self.list.results
    }
}

#[derive(Debug)]
pub struct CatalogScreen {
    sections: [Section; 4],
    carousel: CarouselController,
    /// Carousel focus as seen by the background
    focus: watch::Receiver<usize>,
    crossfade: BackgroundCrossfade,
    /// Whether the screen is shown and owns a background
    mounted: bool,
    image_base: String,
}

impl CatalogScreen {
    pub fn new(image_base: impl Into<String>, crossfade_duration: Duration) -> Self {
        let carousel = CarouselController::new(0, PAGE_WIDTH);
        let focus = carousel.subscribe();

        Self {
            sections: Category::ALL.map(Section::new),
            carousel,
            focus,
            crossfade: BackgroundCrossfade::new(crossfade_duration),
            mounted: true,
            image_base: image_base.into(),
        }
    }

    pub fn section(&self, category: Category) -> &Section {
        &self.sections[Self::slot(category)]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn crossfade(&self) -> &BackgroundCrossfade {
        &self.crossfade
    }

    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    /// Store the outcome of one list request. Failures only affect their
    /// own section.
    pub fn apply_load(&mut self, category: Category, result: Result<MovieList, CatalogError>) {
        let section = &mut self.sections[Self::slot(category)];
        match result {
            Ok(list) => {
                tracing::info!("🎬 Loaded {} {} movies", list.len(), category);
                section.list = list;
                section.status = LoadStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!("⚠️  Failed to load {} movies: {}", category, err);
                section.list = MovieList::default();
                section.status = LoadStatus::Failed(err.to_string());
            }
        }

        if category == Category::Popular {
            let count = self.section(Category::Popular).list.len();
            self.carousel.set_count(count);
            self.observe_focus();
            // New list, the focused movie may differ at the same index
            self.sync_background();
        }
    }

    /// Returns `true` if focus moved
    pub fn page_settled(&mut self, index: isize) -> bool {
        self.carousel.on_page_settled(index);
        self.observe_focus()
    }

    pub fn scrolled(&mut self, offset_x: f32) -> bool {
        self.carousel.on_scrolled(offset_x);
        self.observe_focus()
    }

    /// Page by `delta` items (keyboard or arrow buttons)
    pub fn step(&mut self, delta: isize) -> bool {
        let current = self.carousel.focused().unwrap_or(0) as isize;
        self.page_settled(current.saturating_add(delta))
    }

    /// Scrolling stopped. Returns `true` if the carousel must be scrolled
    /// onto the focused page.
    pub fn settle(&mut self) -> bool {
        self.carousel.settle()
    }

    pub fn focused_movie(&self) -> Option<&Movie> {
        let index = self.carousel.focused()?;
        self.section(Category::Popular).movies().get(index)
    }

    /// Backdrop of the focused popular movie. Grid sections never drive it.
    pub fn background_target(&self) -> Option<String> {
        let path = self.focused_movie()?.backdrop_path.as_deref();
        image_url(&self.image_base, ImageSize::W1280, path)
    }

    /// Background image a queued fade is waiting on
    pub fn pending_layer(&self) -> Option<&str> {
        self.crossfade.pending()
    }

    /// A background image finished loading
    pub fn layer_ready(&mut self, url: &str, now: Instant) -> bool {
        self.crossfade.layer_ready(url, now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.crossfade.tick(now);
    }

    pub fn is_animating(&self) -> bool {
        self.crossfade.is_animating()
    }

    /// Leaving the screen cancels any running fade
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.crossfade.unmount();
    }

    /// Coming back shows the focused backdrop without a fade
    pub fn remount(&mut self) {
        self.mounted = true;
        self.crossfade.unmount();
        self.sync_background();
    }

    /// Turn a tap on any section into a navigation event
    pub fn select(&self, category: Category, index: usize) -> Option<NavigationEvent> {
        let movie = self.section(category).movies().get(index)?;
        match NavigationEvent::details(movie) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::error!("❌ Could not encode movie {}: {}", movie.id, err);
                None
            }
        }
    }

    /// Pick up a focus change published by the carousel
    fn observe_focus(&mut self) -> bool {
        let changed = matches!(self.focus.has_changed(), Ok(true));
        if changed {
            self.focus.mark_unchanged();
            self.sync_background();
        }
        changed
    }

    fn sync_background(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let target = self.background_target();
        self.crossfade.retarget(target.as_deref())
    }

    fn slot(category: Category) -> usize {
        match category {
            Category::Popular => 0,
            Category::NowPlaying => 1,
            Category::TopRated => 2,
            Category::Upcoming => 3,
        }
    }
}
