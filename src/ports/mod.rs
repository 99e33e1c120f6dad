//! Ports - trait seams between the bridge core and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the
//! runtime and adapters depend on; concrete integrations implement them.
//!
//! - `BridgeAdapter` - the capability every bridge exposes to the runtime
//! - `TransitSource` - the departure data source behind the transit bridge

mod bridge;
mod transit;

pub use bridge::BridgeAdapter;
pub use transit::{Departure, Station, TransitSource};
