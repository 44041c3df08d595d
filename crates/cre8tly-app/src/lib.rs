//! Cre8tly Studio Application
//!
//! The application shell: configuration, the context object that hands
//! shared services to components, and editor command dispatch.

mod commands;
mod config;
mod context;

pub use commands::{Command, Shortcut, ShortcutRegistry};
pub use config::AppConfig;
pub use context::{AppContext, AppError, AppResult};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
