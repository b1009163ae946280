//! # Shelfwise Common Library
//!
//! Shared code for the Shelfwise crates including:
//! - Error type and result alias
//! - Configuration loading (service endpoint, logging, bind address)
//! - Event types (ShelfEvent enum) and the EventBus
//! - Wire types exchanged with the recommendation service

pub mod api;
pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
