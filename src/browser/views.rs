//! DOM-backed modal views.
//!
//! Views are built once at startup from the element ids in [`DomIds`]. A
//! missing modal root yields no view at all; missing inner elements are
//! skipped individually.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};

use super::page::{selected, set_scroll_locked};
use crate::config::DomIds;
use crate::state::auth_modal::{AuthModalView, AuthTab};
use crate::state::profile_modal::{ProfileCard, ProfileModalView};

const OPEN_CLASS: &str = "active";
const ERROR_CLASS: &str = "error";

pub const TAB_ATTR: &str = "data-tab";
pub const TAB_PANEL_ATTR: &str = "data-tab-panel";

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    match document.get_element_by_id(id)?.dyn_into::<T>() {
        Ok(element) => Some(element),
        Err(_) => {
            log::warn!("dom: #{id} has an unexpected element type");
            None
        }
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if element.class_list().toggle_with_force(class, on).is_err() {
        log::warn!("dom: could not toggle class `{class}`");
    }
}

fn for_each_match(root: &Element, selector: &str, mut f: impl FnMut(&Element)) {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(element) = nodes.item(i).and_then(|n| n.dyn_ref::<Element>().cloned()) {
            f(&element);
        }
    }
}

fn set_text(element: Option<&Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

pub struct DomAuthModalView {
    document: Document,
    root: Element,
    login_form: Option<HtmlFormElement>,
    register_form: Option<HtmlFormElement>,
    login_error: Option<HtmlElement>,
    register_error: Option<HtmlElement>,
}

impl DomAuthModalView {
    /// `None` when the page has no auth modal (the viewer is logged in).
    pub fn find(document: &Document, dom: &DomIds) -> Option<Self> {
        let root = document.get_element_by_id(&dom.auth_modal)?;
        Some(Self {
            document: document.clone(),
            root,
            login_form: by_id(document, &dom.login_form),
            register_form: by_id(document, &dom.register_form),
            login_error: by_id(document, &dom.login_error),
            register_error: by_id(document, &dom.register_error),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn form(&self, form: AuthTab) -> Option<&HtmlFormElement> {
        match form {
            AuthTab::Login => self.login_form.as_ref(),
            AuthTab::Register => self.register_form.as_ref(),
        }
    }
}

impl AuthModalView for DomAuthModalView {
    fn set_visible(&self, visible: bool) {
        toggle_class(&self.root, OPEN_CLASS, visible);
    }

    fn set_active_tab(&self, tab: AuthTab) {
        let selector = format!("[{TAB_ATTR}]");
        for_each_match(&self.root, &selector, |el| {
            let active = el.get_attribute(TAB_ATTR).as_deref() == Some(tab.as_str());
            toggle_class(el, OPEN_CLASS, active);
        });
        let selector = format!("[{TAB_PANEL_ATTR}]");
        for_each_match(&self.root, &selector, |el| {
            let active = el.get_attribute(TAB_PANEL_ATTR).as_deref() == Some(tab.as_str());
            toggle_class(el, OPEN_CLASS, active);
        });
    }

    fn set_scroll_locked(&self, locked: bool) {
        set_scroll_locked(&self.document, locked);
    }

    fn set_error(&self, form: AuthTab, message: Option<&str>) {
        let slot = match form {
            AuthTab::Login => self.login_error.as_ref(),
            AuthTab::Register => self.register_error.as_ref(),
        };
        let Some(slot) = slot else {
            return;
        };
        slot.set_text_content(message);
        slot.set_hidden(message.is_none());
    }

    fn reset_form(&self, form: AuthTab) {
        if let Some(form) = self.form(form) {
            form.reset();
        }
    }

    fn set_login_email(&self, email: &str) {
        const EMAIL_INPUT: &str = "input[name=\"email\"]";
        let input = self
            .login_form
            .as_ref()
            .and_then(|form| selected(form.query_selector(EMAIL_INPUT), EMAIL_INPUT))
            .and_then(|el| el.dyn_ref::<HtmlInputElement>().cloned());
        match input {
            Some(input) => input.set_value(email),
            None => log::warn!("dom: login form has no email input"),
        }
    }
}

pub struct DomProfileModalView {
    document: Document,
    root: Element,
    status: Option<HtmlElement>,
    details: Option<HtmlElement>,
    email: Option<Element>,
    username: Option<Element>,
    full_name: Option<Element>,
    created_at: Option<Element>,
    account_status: Option<Element>,
    admin_link: Option<HtmlElement>,
}

impl DomProfileModalView {
    pub fn find(document: &Document, dom: &DomIds) -> Option<Self> {
        let root = document.get_element_by_id(&dom.profile_modal)?;
        Some(Self {
            document: document.clone(),
            root,
            status: by_id(document, &dom.profile_status),
            details: by_id(document, &dom.profile_details),
            email: document.get_element_by_id(&dom.profile_email),
            username: document.get_element_by_id(&dom.profile_username),
            full_name: document.get_element_by_id(&dom.profile_full_name),
            created_at: document.get_element_by_id(&dom.profile_created_at),
            account_status: document.get_element_by_id(&dom.profile_account_status),
            admin_link: by_id(document, &dom.profile_admin_link),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn show_status(&self, text: &str, is_error: bool) {
        if let Some(status) = self.status.as_ref() {
            status.set_text_content(Some(text));
            status.set_hidden(false);
            toggle_class(status, ERROR_CLASS, is_error);
        }
        if let Some(details) = self.details.as_ref() {
            details.set_hidden(true);
        }
    }
}

impl ProfileModalView for DomProfileModalView {
    fn set_visible(&self, visible: bool) {
        toggle_class(&self.root, OPEN_CLASS, visible);
    }

    fn set_scroll_locked(&self, locked: bool) {
        set_scroll_locked(&self.document, locked);
    }

    fn show_loading(&self, placeholder: &str) {
        self.show_status(placeholder, false);
    }

    fn render_profile(&self, card: &ProfileCard) {
        set_text(self.email.as_ref(), &card.email);
        set_text(self.username.as_ref(), &card.username);
        set_text(self.full_name.as_ref(), &card.display_name);
        set_text(self.created_at.as_ref(), card.created_on.as_deref().unwrap_or("—"));
        set_text(self.account_status.as_ref(), &format!("{} · {}", card.status_label, card.role_label));
        if let Some(status) = self.status.as_ref() {
            status.set_hidden(true);
        }
        if let Some(details) = self.details.as_ref() {
            details.set_hidden(false);
        }
    }

    fn set_admin_link(&self, href: Option<&str>) {
        let Some(link) = self.admin_link.as_ref() else {
            return;
        };
        if let Some(href) = href {
            if link.set_attribute("href", href).is_err() {
                log::warn!("dom: could not set admin link target");
            }
        }
        link.set_hidden(href.is_none());
    }

    fn show_error(&self, message: &str) {
        self.show_status(message, true);
    }
}
