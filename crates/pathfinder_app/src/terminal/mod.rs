//! Line-driven terminal front end.
mod app;
mod command;
mod effects;
mod render;

pub use app::run_app;
