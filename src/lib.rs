//! Hivebridge - Event/Action Bridge
//!
//! This crate converts heterogeneous external triggers (inbound HTTP
//! requests, transit-departure queries) into a uniform, typed event stream,
//! and executes inbound actions as outbound side effects whose results are
//! re-emitted as events.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod runtime;
