//! Networking modules for CSRF-safe requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! `csrf` locates the page token, `transport` defines the wire seam,
//! `dispatch` attaches the token to state-changing requests, `multipart`
//! replays file-upload forms, `session` implements the auth endpoints and
//! `types` holds their JSON schema.

pub mod csrf;
pub mod dispatch;
pub mod multipart;
pub mod session;
pub mod transport;
pub mod types;
