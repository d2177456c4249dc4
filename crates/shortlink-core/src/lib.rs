//! Core types and traits for the shortlink service.
//!
//! This crate provides the types shared by the link stores, the shortening
//! engine and the HTTP gateway: short codes, URL fingerprints, the backend
//! key layout, the detail record and the error taxonomy.

pub mod detail;
pub mod error;
pub mod fingerprint;
pub mod key;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use detail::LinkDetail;
pub use error::{ErrorClass, LinkError, StoreError};
pub use fingerprint::Fingerprint;
pub use key::LinkKey;
pub use shortcode::ShortCode;
pub use shortener::{ShortenRequest, Shortener};
pub use store::LinkStore;
