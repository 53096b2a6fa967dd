//! Browser entry point and DOM event routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`start`] runs when the wasm module is instantiated. It reads the page
//! config, installs the console logger, builds every controller against the
//! live document and attaches three document-level listeners (submit, click
//! and keydown). [`dispose`] drops them again.
//!
//! DESIGN
//! ======
//! Listeners only translate DOM events into controller triggers. Async work
//! is spawned with `spawn_local`; the [`Resync`] it yields is applied here.

mod listeners;
mod page;
mod transport;
mod views;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, KeyboardEvent};

use crate::components::form_binding::{FormBindingController, FormSubmission};
use crate::config::{ClientConfig, DomIds};
use crate::net::csrf::TokenLocator;
use crate::net::dispatch::RequestDispatcher;
use crate::net::multipart::{InterceptOutcome, MultipartInterceptor, SubmitDecision};
use crate::net::session::SessionApi;
use crate::state::auth_modal::{AuthModalController, AuthTab, AuthTrigger};
use crate::state::profile_modal::{ProfileModalController, ProfileTrigger};
use crate::util::page::Resync;
use listeners::Listener;
use page::{AlertNotifier, DocumentTokenSource, DomForm, apply_resync, selected};
use transport::FetchTransport;
use views::{DomAuthModalView, DomProfileModalView, TAB_ATTR};

const AUTH_OPEN_ATTR: &str = "data-auth-open";
const AUTH_CLOSE_ATTR: &str = "data-auth-close";
const PROFILE_OPEN_ATTR: &str = "data-profile-open";
const PROFILE_CLOSE_ATTR: &str = "data-profile-close";

type Api = SessionApi<FetchTransport, DocumentTokenSource>;
type AuthModal = AuthModalController<DomAuthModalView>;
type ProfileModal = ProfileModalController<Api, DomProfileModalView, AlertNotifier>;
type Forms = FormBindingController<Api, DomAuthModalView>;
type Interceptor = MultipartInterceptor<FetchTransport, DocumentTokenSource, AlertNotifier>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(document) = page::document() else {
        web_sys::console::error_1(&"landing-client: no document".into());
        return;
    };

    let (config, config_error) = page::load_config(&document);
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"landing-client: logger already installed".into());
    }
    if let Some(e) = config_error {
        log::warn!("config: falling back to defaults: {e}");
    }

    let app = App::mount(&document, &config);
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    log::info!("landing-client: started");
}

/// Detach every listener installed by [`start`].
#[wasm_bindgen]
pub fn dispose() {
    APP.with(|slot| slot.borrow_mut().take());
    log::info!("landing-client: disposed");
}

struct App {
    _listeners: Vec<Listener>,
}

impl App {
    fn mount(document: &Document, config: &ClientConfig) -> Self {
        let tokens = Rc::new(TokenLocator::new(DocumentTokenSource::new(document.clone()), &config.csrf));
        tokens.prime();
        let dispatcher = Rc::new(RequestDispatcher::new(FetchTransport, tokens, config.csrf.header_name.clone()));
        let api = Rc::new(SessionApi::new(
            Rc::clone(&dispatcher),
            config.endpoints.clone(),
            config.messages.clone(),
        ));
        let auth = Rc::new(AuthModalController::new(DomAuthModalView::find(document, &config.dom)));
        let profile = ProfileModalController::new(
            Rc::clone(&api),
            DomProfileModalView::find(document, &config.dom),
            AlertNotifier,
            config,
        );
        let forms = FormBindingController::new(api, Rc::clone(&auth), config.messages.clone());
        let interceptor = MultipartInterceptor::new(dispatcher, AlertNotifier, config);

        let router = Rc::new(Router {
            dom: config.dom.clone(),
            auth,
            profile,
            forms,
            interceptor,
        });

        let target: &web_sys::EventTarget = document.as_ref();
        let mut listeners = Vec::with_capacity(3);
        let handler = Rc::clone(&router);
        listeners.extend(Listener::attach(target, "submit", move |event| handler.on_submit(&event)));
        let handler = Rc::clone(&router);
        listeners.extend(Listener::attach(target, "click", move |event| handler.on_click(&event)));
        let handler = router;
        listeners.extend(Listener::attach(target, "keydown", move |event| handler.on_keydown(&event)));
        Self { _listeners: listeners }
    }
}

/// Routes document events to the controllers.
struct Router {
    dom: DomIds,
    auth: Rc<AuthModal>,
    profile: ProfileModal,
    forms: Forms,
    interceptor: Interceptor,
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    selected(target.closest(selector), selector)
}

fn apply_if_any(resync: Option<Resync>) {
    if let Some(resync) = resync {
        apply_resync(&resync);
    }
}

impl Router {
    fn on_submit(self: &Rc<Self>, event: &Event) {
        let Some(form) = event.target().and_then(|t| t.dyn_ref::<HtmlFormElement>().cloned()) else {
            return;
        };
        let id = form.id();
        let form = DomForm(form);

        if id == self.dom.login_form || id == self.dom.register_form {
            event.prevent_default();
            let entries = form.text_entries();
            let submission = if id == self.dom.login_form {
                FormSubmission::login(&entries)
            } else {
                FormSubmission::register(&entries)
            };
            let router = Rc::clone(self);
            spawn_local(async move { apply_if_any(router.forms.submit(submission).await) });
            return;
        }

        let Some(page_url) = page::current_url() else {
            log::warn!("multipart: page URL unavailable; native submission continues");
            return;
        };
        if let SubmitDecision::Intercepted(pending) = self.interceptor.on_submit(&form, event, &page_url) {
            let router = Rc::clone(self);
            spawn_local(async move {
                if let InterceptOutcome::Resync(resync) = router.interceptor.transmit(pending).await {
                    apply_resync(&resync);
                }
            });
        }
    }

    fn on_click(self: &Rc<Self>, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_ref::<Element>().cloned()) else {
            return;
        };

        if let Some(control) = closest(&target, &format!("[{AUTH_OPEN_ATTR}]")) {
            event.prevent_default();
            let tab = control.get_attribute(AUTH_OPEN_ATTR).as_deref().and_then(AuthTab::parse);
            self.auth.dispatch(AuthTrigger::Open(tab));
            return;
        }
        if let Some(tab) = closest(&target, &format!("[{TAB_ATTR}]"))
            .and_then(|el| el.get_attribute(TAB_ATTR))
            .as_deref()
            .and_then(AuthTab::parse)
        {
            self.auth.dispatch(AuthTrigger::SwitchTab(tab));
            return;
        }
        let auth_backdrop = self.auth.view().is_some_and(|view| view.root() == &target);
        if auth_backdrop || closest(&target, &format!("[{AUTH_CLOSE_ATTR}]")).is_some() {
            self.auth.dispatch(AuthTrigger::Close);
            return;
        }

        if closest(&target, &format!("[{PROFILE_OPEN_ATTR}]")).is_some() {
            event.prevent_default();
            self.spawn_profile(ProfileTrigger::Open);
            return;
        }
        let profile_backdrop = self.profile.view().is_some_and(|view| view.root() == &target);
        if profile_backdrop || closest(&target, &format!("[{PROFILE_CLOSE_ATTR}]")).is_some() {
            self.profile.close();
            return;
        }
        if closest(&target, &format!("#{}", self.dom.logout_button)).is_some() {
            event.prevent_default();
            self.spawn_profile(ProfileTrigger::Logout);
        }
    }

    fn on_keydown(&self, event: &Event) {
        let is_escape = event.dyn_ref::<KeyboardEvent>().is_some_and(|key| key.key() == "Escape");
        if is_escape {
            self.auth.dispatch(AuthTrigger::Close);
            self.profile.close();
        }
    }

    fn spawn_profile(self: &Rc<Self>, trigger: ProfileTrigger) {
        let router = Rc::clone(self);
        spawn_local(async move { apply_if_any(router.profile.dispatch(trigger).await) });
    }
}
