//! Xitter core: multi-space post distribution and feed aggregation
//!
//! A short text post is authored into one or more spaces, may be
//! re-broadcast into further spaces without duplicating its identity,
//! and replies thread under it. Feeds merge the streams of several
//! spaces into deterministic, deduplicated views.
//!
//! Layering, leaf first: [`model`] holds the data types, [`registry`]
//! owns spaces/users/memberships, [`store`] owns canonical post
//! records, [`distribution`] is the only writer path, [`feed`] is the
//! read side, and [`service`] is the async boundary the session layer
//! talks to.

pub mod config;
pub mod distribution;
pub mod error;
pub mod feed;
pub mod logging;
pub mod model;
pub mod registry;
pub mod service;
pub mod store;
pub mod test_utils;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use service::SocialService;
