//! Controller-side session loop.
//!
//! One connection is served at a time. The server owns the single
//! authoritative [`Status`](spalink_messages::Status) for the process
//! lifetime, pushes it on connect and once a second thereafter, and
//! applies inbound commands to it. Decode failures are logged and
//! dropped; only the peer closing the connection ends a session.

pub mod dispatch;
pub mod error;
pub mod replies;
pub mod server;

pub use dispatch::dispatch;
pub use error::{Result, ServerError};
pub use server::SpaServer;
