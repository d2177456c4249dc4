//! Link shortening and resolution engine.
//!
//! [`ShortenerService`] turns URLs into short codes backed by any
//! [`LinkStore`](shortlink_core::LinkStore) and resolves them back. Core types
//! are re-exported from `shortlink_core`.

pub mod service;

pub use service::{ShortenerService, EXPIRED_SENTINEL, MAX_EXPIRATION_IN_MINUTES};
pub use shortlink_core::{LinkDetail, LinkError, ShortCode, ShortenRequest, Shortener};
