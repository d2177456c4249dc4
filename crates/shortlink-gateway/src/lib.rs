//! HTTP front end of the shortlink service.
//!
//! Routes requests to a [`Shortener`](shortlink_core::Shortener), validates
//! request bodies and maps engine errors to status codes.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
