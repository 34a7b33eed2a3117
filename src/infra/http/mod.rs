//! HTTP adapter for the gateway contract.

mod client;

pub(crate) use client::METRIC_REQUESTS_TOTAL;
pub use client::{HttpGateway, with_trailing_slash};
