//! # alloy-host
//!
//! The session an extension holds with its host console.
//!
//! A [`HostSession`] performs the connection handshake through a
//! [`HostConnector`], owns the collection store facade, and publishes two
//! pieces of state to whoever needs them:
//!
//! - a [`Readiness`] gate; nothing may call the facade before it opens
//! - the latest [`HostData`] (theme and other host-provided fields)
//!
//! Components receive these explicitly rather than through ambient context.

mod error;
mod session;

pub use error::Error;
pub use session::{Connection, HostConnector, HostData, HostSession, Readiness, StaticConnector};
