//! Two-layer background crossfade
//!
//! When the focused carousel item changes, the old backdrop stays fully
//! opaque underneath while the new one fades in on top of it. The fade clock
//! only starts once the incoming image is ready to draw, so a slow download
//! never leaves the background empty. A new target arriving mid-fade snaps
//! the progress back to zero and restarts from the image that was current at
//! that moment (last trigger wins).

use std::time::{Duration, Instant};

/// Default fade duration
pub const CROSSFADE_DURATION: Duration = Duration::from_millis(1000);

/// Full image URL used as a background layer
pub type ImageRef = String;

/// Cubic ease-in-out applied to the rendered opacity (0.0 to 1.0)
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrossfadeState {
    Idle {
        current: Option<ImageRef>,
    },
    Transitioning {
        previous: ImageRef,
        current: ImageRef,
        /// `None` until the incoming image has loaded (or failed to)
        started: Option<Instant>,
        /// Linear time progress, 0.0 to 1.0
        progress: f32,
    },
}

/// What the background should draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers<'a> {
    /// Drawn fully opaque underneath
    pub previous: Option<&'a str>,
    pub current: Option<&'a str>,
    pub current_opacity: f32,
}

#[derive(Debug, Clone)]
pub struct BackgroundCrossfade {
    state: CrossfadeState,
    duration: Duration,
}

impl Default for BackgroundCrossfade {
    fn default() -> Self {
        Self::new(CROSSFADE_DURATION)
    }
}

impl BackgroundCrossfade {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: CrossfadeState::Idle { current: None },
            duration,
        }
    }

    pub fn state(&self) -> &CrossfadeState {
        &self.state
    }

    pub fn current(&self) -> Option<&str> {
        match &self.state {
            CrossfadeState::Idle { current } => current.as_deref(),
            CrossfadeState::Transitioning { current, .. } => Some(current),
        }
    }

    pub fn previous(&self) -> Option<&str> {
        match &self.state {
            CrossfadeState::Idle { .. } => None,
            CrossfadeState::Transitioning { previous, .. } => Some(previous),
        }
    }

    pub fn progress(&self) -> f32 {
        match self.state {
            CrossfadeState::Idle { .. } => 1.0,
            CrossfadeState::Transitioning { progress, .. } => progress,
        }
    }

    /// A fade is running and needs animation frames
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            CrossfadeState::Transitioning {
                started: Some(_),
                ..
            }
        )
    }

    /// Incoming image of a fade that is waiting for it to load
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            CrossfadeState::Transitioning {
                current,
                started: None,
                ..
            } => Some(current),
            _ => None,
        }
    }

    /// Point the background at a new image.
    ///
    /// An absent target unmounts the background. A target arriving while
    /// nothing is mounted is shown directly. Otherwise a differing target
    /// queues a fade that starts with [`Self::layer_ready`]. Returns `true`
    /// only when a fade was queued.
    pub fn retarget(&mut self, target: Option<&str>) -> bool {
        let Some(target) = target else {
            self.unmount();
            return false;
        };

        if self.current() == Some(target) {
            return false;
        }

        let from = match &self.state {
            CrossfadeState::Idle { current: None } => None,
            CrossfadeState::Idle {
                current: Some(current),
            }
            | CrossfadeState::Transitioning {
                current,
                started: Some(_),
                ..
            } => Some(current.clone()),
            // Nothing of the waiting image was drawn yet
            CrossfadeState::Transitioning {
                previous,
                started: None,
                ..
            } => Some(previous.clone()),
        };

        let Some(from) = from else {
            self.state = CrossfadeState::Idle {
                current: Some(target.to_string()),
            };
            return false;
        };

        if from == target {
            self.state = CrossfadeState::Idle {
                current: Some(from),
            };
            return false;
        }

        tracing::debug!("🎞️  Background crossfade {} -> {}", from, target);

        self.state = CrossfadeState::Transitioning {
            previous: from,
            current: target.to_string(),
            started: None,
            progress: 0.0,
        };
        true
    }

    /// The image at `url` can be drawn now. Starts the fade waiting on it.
    pub fn layer_ready(&mut self, url: &str, now: Instant) -> bool {
        match &mut self.state {
            CrossfadeState::Transitioning {
                current, started, ..
            } if started.is_none() && current.as_str() == url => {
                *started = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Advance the running fade. Completes into `Idle(current)`.
    pub fn tick(&mut self, now: Instant) {
        let CrossfadeState::Transitioning {
            current,
            started: Some(started),
            progress,
            ..
        } = &mut self.state
        else {
            return;
        };

        let elapsed = now.saturating_duration_since(*started);
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };

        if raw >= 1.0 {
            let current = std::mem::take(current);
            self.state = CrossfadeState::Idle {
                current: Some(current),
            };
        } else {
            *progress = raw.max(0.0);
        }
    }

    /// Cancel any running fade and drop both layers
    pub fn unmount(&mut self) {
        self.state = CrossfadeState::Idle { current: None };
    }

    pub fn layers(&self) -> Layers<'_> {
        match &self.state {
            CrossfadeState::Idle { current } => Layers {
                previous: None,
                current: current.as_deref(),
                current_opacity: 1.0,
            },
            CrossfadeState::Transitioning {
                previous,
                current,
                progress,
                ..
            } => Layers {
                previous: Some(previous),
                current: Some(current),
                current_opacity: ease_in_out_cubic(*progress),
            },
        }
    }
}
