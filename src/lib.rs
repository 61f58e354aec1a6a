//! A native movie catalog browser for TMDB
//!
//! Four catalog lists are loaded independently. The popular list is shown as
//! a paged carousel whose focused movie drives a crossfading, blurred
//! backdrop; the others are shown as poster grids. Selecting any movie opens
//! its details screen.

pub mod app;
pub mod config;
pub mod logging;
pub mod network;
pub mod state;
pub mod ui;

pub use app::Message;
