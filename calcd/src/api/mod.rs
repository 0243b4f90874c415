//! Transport layer: the HTTP/JSON-RPC envelope adapter, the WebSocket
//! chat relay, and process-wide observability counters. All shared
//! mutable state of the service lives here, never in `crate::calc`.

pub mod http;
pub mod metrics;
pub mod ws;

pub use http::{build_router, AppState};
pub use metrics::Metrics;
pub use ws::ChatHub;
