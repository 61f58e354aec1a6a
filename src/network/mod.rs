//! TMDB access
//!
//! This module handles:
//! - Fetching the four movie list endpoints
//! - Building image URLs from relative paths
//! - Downloading, decoding and blurring images

pub mod client;
pub mod error;
pub mod images;
