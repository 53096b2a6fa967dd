//! Controllers binding native server-rendered forms to client state.

pub mod form_binding;
