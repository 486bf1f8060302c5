//! # nexus_core
//!
//! Core domain logic for Nexus.
//!
//! Server side: the persona registry and the chat relay pipeline. Client
//! side: the session model, markup rendering and the one-time disclaimer.
//! Nothing in here performs I/O directly, so the crate builds for both the
//! relay server and the `wasm32` browser bindings.

pub mod disclaimer;
pub mod markup;
pub mod persona;
pub mod relay;
pub mod session;
pub mod turn;
pub mod typing;
pub mod wire;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
