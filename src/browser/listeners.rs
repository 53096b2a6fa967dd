//! Owned DOM event listeners.
//!
//! A [`Listener`] keeps its closure alive and detaches it on drop, so
//! dropping the owning app removes every handler it installed.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::error!("listeners: could not attach `{event}`: {e:?}");
            return None;
        }
        Some(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("listeners: could not detach `{}`", self.event);
        }
    }
}
