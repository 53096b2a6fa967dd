//! Page-level side effects requested by controllers.
//!
//! DESIGN
//! ======
//! Controllers never reload or navigate the page themselves. A successful
//! mutation returns a [`Resync`] and the browser glue applies it, so tests
//! can assert the signal without a real page.

/// Request to re-derive client state from fresh server-rendered markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resync {
    /// Reload the current page.
    Reload,
    /// Navigate to the given absolute URL.
    Navigate(String),
}

/// Blocking, user-visible notice (an `alert` in the browser).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Cancels the native default action of the event being handled.
pub trait PreventDefault {
    fn prevent_default(&self);
}
