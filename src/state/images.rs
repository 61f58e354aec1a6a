use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::network::error::ImageError;
use crate::network::images::ImageVariant;

/// Load state of one image
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Handle),
    /// Rendered as an empty layer, never retried this session
    Failed,
}

/// In-memory handles for posters and blurred backdrops
///
/// Each (url, variant) pair is requested at most once.
#[derive(Debug, Default)]
pub struct ImageCache {
    slots: HashMap<(String, ImageVariant), ImageSlot>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for a loaded image, `None` while loading or after a failure
    pub fn get(&self, url: &str, variant: ImageVariant) -> Option<&Handle> {
        match self.slots.get(&(url.to_string(), variant)) {
            Some(ImageSlot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Claim an image for loading. Returns `true` if the caller should fetch it.
    pub fn begin(&mut self, url: &str, variant: ImageVariant) -> bool {
        let key = (url.to_string(), variant);
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, ImageSlot::Loading);
        true
    }

    pub fn finish(&mut self, url: String, variant: ImageVariant, result: Result<Handle, ImageError>) {
        let slot = match result {
            Ok(handle) => ImageSlot::Ready(handle),
            Err(err) => {
                tracing::warn!("⚠️  Image {} unavailable: {}", url, err);
                ImageSlot::Failed
            }
        };
        self.slots.insert((url, variant), slot);
    }

    /// Loaded or failed, either way nothing more will arrive for it
    pub fn is_settled(&self, url: &str, variant: ImageVariant) -> bool {
        matches!(
            self.slots.get(&(url.to_string(), variant)),
            Some(ImageSlot::Ready(_) | ImageSlot::Failed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://image.tmdb.org/t/p/w500/a.jpg";

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255])
    }

    #[test]
    fn test_requested_once() {
        let mut cache = ImageCache::new();

        assert!(cache.begin(URL, ImageVariant::Sharp));
        assert!(!cache.begin(URL, ImageVariant::Sharp));
        // A blurred copy is a separate image
        assert!(cache.begin(URL, ImageVariant::Blurred));
        assert!(!cache.is_settled(URL, ImageVariant::Sharp));
    }

    #[test]
    fn test_ready_after_load() {
        let mut cache = ImageCache::new();
        cache.begin(URL, ImageVariant::Sharp);
        assert!(cache.get(URL, ImageVariant::Sharp).is_none());

        cache.finish(URL.to_string(), ImageVariant::Sharp, Ok(pixel()));
        assert!(cache.get(URL, ImageVariant::Sharp).is_some());
        assert!(cache.is_settled(URL, ImageVariant::Sharp));
        assert!(cache.get(URL, ImageVariant::Blurred).is_none());
    }

    #[test]
    fn test_failure_is_not_retried() {
        let mut cache = ImageCache::new();
        cache.begin(URL, ImageVariant::Blurred);
        cache.finish(URL.to_string(), ImageVariant::Blurred, Err(ImageError::Status(404)));

        assert!(cache.is_settled(URL, ImageVariant::Blurred));
        assert!(cache.get(URL, ImageVariant::Blurred).is_none());
        assert!(!cache.begin(URL, ImageVariant::Blurred));
    }
}
