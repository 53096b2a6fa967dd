//! Login/register modal visibility, tab selection and inline errors.
//!
//! DESIGN
//! ======
//! [`transition`] is the pure state machine. [`AuthModalController`] runs
//! it and applies the entry/exit side effects to its view: opening
//! suspends background scroll, closing restores it and clears both error
//! slots, switching tabs clears both error slots.
//!
//! The server omits the modal for authenticated viewers. A controller built
//! without a view therefore ignores every call instead of failing.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use std::cell::Cell;

/// Auth modal tab, which also names the form it contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub const ALL: [Self; 2] = [Self::Login, Self::Register];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Parse a `data-tab` / `data-auth-open` attribute value.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthModalState {
    #[default]
    Closed,
    Open(AuthTab),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTrigger {
    /// Explicit open control; `None` opens on the login tab.
    Open(Option<AuthTab>),
    SwitchTab(AuthTab),
    /// Close control, backdrop click outside the content, or Escape.
    Close,
}

/// Next state for `trigger` applied in `state`.
pub fn transition(state: AuthModalState, trigger: AuthTrigger) -> AuthModalState {
    match (state, trigger) {
        (AuthModalState::Closed, AuthTrigger::Open(tab)) => AuthModalState::Open(tab.unwrap_or_default()),
        (AuthModalState::Open(_), AuthTrigger::Open(Some(tab)) | AuthTrigger::SwitchTab(tab)) => {
            AuthModalState::Open(tab)
        }
        (AuthModalState::Open(_), AuthTrigger::Close) => AuthModalState::Closed,
        (state, _) => state,
    }
}

/// DOM operations the auth modal needs.
pub trait AuthModalView {
    fn set_visible(&self, visible: bool);
    fn set_active_tab(&self, tab: AuthTab);
    fn set_scroll_locked(&self, locked: bool);
    /// Write (`Some`) or clear (`None`) the error slot of `form`.
    fn set_error(&self, form: AuthTab, message: Option<&str>);
    fn reset_form(&self, form: AuthTab);
    fn set_login_email(&self, email: &str);
}

pub struct AuthModalController<V> {
    view: Option<V>,
    state: Cell<AuthModalState>,
}

impl<V: AuthModalView> AuthModalController<V> {
    pub fn new(view: Option<V>) -> Self {
        if view.is_none() {
            log::debug!("auth modal: not rendered on this page");
        }
        Self { view, state: Cell::new(AuthModalState::Closed) }
    }

    pub fn state(&self) -> AuthModalState {
        self.state.get()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn dispatch(&self, trigger: AuthTrigger) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let current = self.state.get();
        let next = transition(current, trigger);

        match (current, next) {
            (AuthModalState::Closed, AuthModalState::Open(tab)) => {
                view.set_active_tab(tab);
                view.set_visible(true);
                view.set_scroll_locked(true);
            }
            (AuthModalState::Open(_), AuthModalState::Open(tab)) => {
                if matches!(trigger, AuthTrigger::Open(None)) {
                    return;
                }
                view.set_active_tab(tab);
                clear_errors(view);
            }
            (AuthModalState::Open(_), AuthModalState::Closed) => {
                view.set_visible(false);
                clear_errors(view);
                view.set_scroll_locked(false);
            }
            (AuthModalState::Closed, AuthModalState::Closed) => return,
        }
        log::debug!("auth modal: {current:?} -> {next:?}");
        self.state.set(next);
    }

    /// Show `message` in the error slot of `form`. Never changes state.
    pub fn show_error(&self, form: AuthTab, message: &str) {
        if let Some(view) = self.view.as_ref() {
            view.set_error(form, Some(message));
        }
    }

    pub fn clear_error(&self, form: AuthTab) {
        if let Some(view) = self.view.as_ref() {
            view.set_error(form, None);
        }
    }

    pub fn reset_form(&self, form: AuthTab) {
        if let Some(view) = self.view.as_ref() {
            view.reset_form(form);
        }
    }

    pub fn prefill_login_email(&self, email: &str) {
        if let Some(view) = self.view.as_ref() {
            view.set_login_email(email);
        }
    }
}

fn clear_errors(view: &impl AuthModalView) {
    for form in AuthTab::ALL {
        view.set_error(form, None);
    }
}
