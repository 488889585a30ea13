//! Client for the Eco Megane solar monitoring portal.
//!
//! The portal has no public API. [`open`] logs in like a browser would, after which
//! [`get_hourly_kwh`] and [`get_daily_kwh`] scrape generation figures from the graph screens.
//! The returned [`model::Session`] is released when dropped.

pub mod api;
pub mod model;

pub use api::{
    client, close, get, get_daily_kwh, get_hourly_kwh, open, open_with_timeout, post, Error,
};
