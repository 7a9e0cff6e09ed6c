//! Interactive page-turn viewer for books stored as numbered page images.

pub mod app;
pub mod book;
pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod navigator;
pub mod prelude;
pub mod surface;
pub mod turn;
pub mod ui;
