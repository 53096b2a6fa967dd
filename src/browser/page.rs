//! Document-level helpers: token source, notices, resync, scroll and forms.
//!
//! Every lookup tolerates missing elements; a page that lacks one simply
//! does not use the feature that needs it.

use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, FormData, HtmlFormElement, HtmlInputElement};

use crate::config::{CONFIG_ELEMENT_ID, ClientConfig};
use crate::error::ClientError;
use crate::net::csrf::TokenSource;
use crate::net::multipart::{FormAttrs, SubmittedForm};
use crate::util::page::{Notifier, PreventDefault, Resync};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// URL of the current page.
pub fn current_url() -> Option<Url> {
    let href = match web_sys::window()?.location().href() {
        Ok(href) => href,
        Err(e) => {
            log::warn!("page: location unavailable: {e:?}");
            return None;
        }
    };
    match Url::parse(&href) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("page: unparseable location `{href}`: {e}");
            None
        }
    }
}

/// Result of a `querySelector`/`closest` call. A rejected selector is
/// logged and treated as no match.
pub fn selected(result: Result<Option<Element>, JsValue>, selector: &str) -> Option<Element> {
    match result {
        Ok(found) => found,
        Err(e) => {
            log::warn!("page: selector `{selector}` rejected: {e:?}");
            None
        }
    }
}

/// Config from the page's JSON block, or defaults.
///
/// Returns the parse error alongside the defaults so it can be logged once
/// logging is up.
pub fn load_config(document: &Document) -> (ClientConfig, Option<ClientError>) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|raw| !raw.trim().is_empty());
    match raw.map(|raw| ClientConfig::from_json(&raw)) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (ClientConfig::default(), Some(e)),
        None => (ClientConfig::default(), None),
    }
}

pub fn apply_resync(resync: &Resync) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let result = match resync {
        Resync::Reload => location.reload(),
        Resync::Navigate(url) => location.set_href(url),
    };
    if let Err(e) = result {
        log::error!("page: resync {resync:?} failed: {e:?}");
    }
}

pub fn set_scroll_locked(document: &Document, locked: bool) {
    let Some(body) = document.body() else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    if body.style().set_property("overflow", value).is_err() {
        log::warn!("page: could not set body overflow");
    }
}

/// Token lookup against the live document.
pub struct DocumentTokenSource {
    document: Document,
}

impl DocumentTokenSource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl TokenSource for DocumentTokenSource {
    fn hidden_field(&self, field_name: &str) -> Option<String> {
        let selector = format!("form input[type=\"hidden\"][name=\"{field_name}\"]");
        let element = selected(self.document.query_selector(&selector), &selector)?;
        Some(element.dyn_ref::<HtmlInputElement>()?.value())
    }

    fn meta_content(&self, meta_name: &str) -> Option<String> {
        let selector = format!("meta[name=\"{meta_name}\"]");
        selected(self.document.query_selector(&selector), &selector)?.get_attribute("content")
    }
}

/// Blocking `alert()` notices.
#[derive(Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.alert_with_message(message).is_err() {
            log::warn!("page: alert failed: {message}");
        }
    }
}

impl PreventDefault for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

/// A submitted `<form>` element.
pub struct DomForm(pub HtmlFormElement);

impl DomForm {
    /// Text entries of the form; file inputs are skipped.
    pub fn text_entries(&self) -> Vec<(String, String)> {
        let Ok(form_data) = FormData::new_with_form(&self.0) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&form_data) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter_map(|entry| {
                let pair = entry.dyn_ref::<js_sys::Array>()?;
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }
}

impl SubmittedForm for DomForm {
    type Body = FormData;

    fn attrs(&self) -> FormAttrs {
        FormAttrs {
            enctype: self.0.get_attribute("enctype"),
            method: self.0.get_attribute("method"),
            action: self.0.get_attribute("action"),
        }
    }

    fn snapshot(&self) -> Result<FormData, ClientError> {
        FormData::new_with_form(&self.0).map_err(|e| ClientError::Dom(format!("{e:?}")))
    }
}
