//! UI layer for the desktop todo window.

pub mod app;

pub use app::TodoApp;
