//! Modal state machines for the auth and profile dialogs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both controllers are constructed with their view injected and receive
//! every trigger through one `dispatch` entry point, so tests drive them
//! with fake views instead of a DOM.

pub mod auth_modal;
pub mod profile_modal;
