rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod auth;
pub mod config;
pub mod content;
pub mod event;
pub mod router;
pub mod session;
pub mod ui;
pub mod upload;
