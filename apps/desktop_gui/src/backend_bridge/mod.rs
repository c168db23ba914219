//! Bridge between the UI thread and the backend worker that owns the todo controller.

pub mod commands;
pub mod runtime;
