//! HTTP API Module
//!
//! Exposes conversion to external callers as JSON-RPC and plain JSON.

mod methods;
mod server;

pub use methods::*;
pub use server::*;
