//! Adapters - the external integrations behind the bridge ports.
//!
//! - `web` - HTTP trigger bridge (inbound GET/POST, outbound POST action)
//! - `transit` - transit-departure bridge over the EFA data source

pub mod transit;
pub mod web;

pub use transit::{EfaClient, TransitBridge, TRANSIT_BRIDGE_NAME};
pub use web::{WebBridge, WEB_BRIDGE_NAME};
