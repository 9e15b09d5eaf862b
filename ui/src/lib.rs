#![warn(clippy::all, rust_2018_idioms)]

//! Desktop front end of ImgShare.

pub mod app;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::ImgShareApp;
