//! HTTP API handlers for shelf-ui

pub mod health;
pub mod search;
pub mod sse;
pub mod wizard;

pub use health::health_routes;
pub use search::search_routes;
pub use sse::wizard_event_stream;
pub use wizard::{wizard_routes, SearchView, WizardView};
