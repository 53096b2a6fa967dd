//! # landing-client
//!
//! WASM client layer for the server-rendered landing site.
//!
//! The server renders every page and embeds a per-render CSRF token. This
//! crate attaches that token to state-changing requests, takes over
//! multipart form submission, and drives the auth and profile modals.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` owns token lookup, request dispatch, multipart interception and the
//! session endpoints. `state` holds the modal state machines, `components`
//! binds the native auth forms to them, and `browser` (hydrate only) wires
//! everything to the real DOM.

pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(test)]
pub(crate) mod test_helpers;
