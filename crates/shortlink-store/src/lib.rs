//! Link store backends.
//!
//! [`RedisLinkStore`] is the production backend shared by every service
//! instance. [`InMemoryLinkStore`] keeps everything in-process and evaluates
//! expiry against an injectable [`Clock`], which makes it the test double for
//! ttl-dependent behavior.

pub mod clock;
pub mod memory;
pub mod redis;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::InMemoryLinkStore;
pub use self::redis::{connection_url, RedisLinkStore};
pub use shortlink_core::{LinkKey, LinkStore, StoreError};
