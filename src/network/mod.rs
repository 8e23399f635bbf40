//! Network layer - gateway calls against the tableros API
//!
//! The Network actor receives commands and sends back uniform results.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{create_client, TableroGateway};
