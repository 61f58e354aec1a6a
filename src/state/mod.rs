//! State management module
//!
//! This module handles all application state, including:
//! - Shared data structures (data.rs)
//! - Carousel focus tracking (carousel.rs)
//! - Background crossfade state machine (crossfade.rs)
//! - The home screen model (catalog.rs)
//! - Screen routing (navigation.rs)
//! - Loaded image handles (images.rs)

pub mod carousel;
pub mod catalog;
pub mod crossfade;
pub mod data;
pub mod images;
pub mod navigation;
