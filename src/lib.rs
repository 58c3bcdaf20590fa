//! Item catalog service: JSON CRUD over a SQLite `items` table.
//!
//! - [`store`]: persistence and the completeness check on single reads
//! - [`handlers`]: axum routes mapping store outcomes to HTTP responses
//! - [`db`]: pool creation and table bootstrap
//! - [`config`], [`logging`]: process setup

pub mod config;
pub mod db;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod store;

pub use handlers::{router, AppState};
pub use models::{CreateItemInput, Item, UpdateItemInput};
pub use store::{ItemStore, SqlItemStore, StoreError};
