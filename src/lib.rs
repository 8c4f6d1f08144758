//! Artisan goods order manager: catalog CRUD with accent-insensitive search
//! and windowed pagination.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod state;

pub use error::{AppError, Result};
