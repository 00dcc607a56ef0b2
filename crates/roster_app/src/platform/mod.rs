//! Terminal host for the roster screens: form, welcome and user list.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
