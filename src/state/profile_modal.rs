//! Profile modal: current-user card, admin link and logout.
//!
//! DESIGN
//! ======
//! Opening shows a loading placeholder and fetches `/auth/me`. A failed
//! fetch leaves the modal open with an inline error so the user can retry
//! or close it. Each open takes a new generation number; a fetch that
//! completes for an earlier generation is dropped, even if the modal was
//! reopened in the meantime. Superusers get the admin link pointed at the
//! configured admin endpoint. Logout returns [`Resync::Reload`] on success; the reloaded page
//! no longer renders the modal.

#[cfg(test)]
#[path = "profile_modal_test.rs"]
mod profile_modal_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{ClientConfig, Messages};
use crate::net::session::SessionService;
use crate::net::types::{SessionResult, UserProfile};
use crate::util::format::format_account_date;
use crate::util::page::{Notifier, Resync};

/// Display projection of a [`UserProfile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub created_on: Option<String>,
    pub status_label: String,
    pub role_label: String,
    pub is_superuser: bool,
}

impl ProfileCard {
    pub fn from_profile(profile: &UserProfile, messages: &Messages) -> Self {
        Self {
            email: profile.email.clone(),
            username: profile.username.clone(),
            display_name: profile.display_name().to_owned(),
            created_on: profile.created_at.as_deref().map(format_account_date),
            status_label: if profile.is_active {
                messages.status_active.clone()
            } else {
                messages.status_blocked.clone()
            },
            role_label: if profile.is_superuser {
                messages.role_admin.clone()
            } else {
                messages.role_user.clone()
            },
            is_superuser: profile.is_superuser,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileContent {
    Loading,
    Loaded(UserProfile),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileModalState {
    #[default]
    Closed,
    Open(ProfileContent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileTrigger {
    Open,
    Close,
    Logout,
}

pub trait ProfileModalView {
    fn set_visible(&self, visible: bool);
    fn set_scroll_locked(&self, locked: bool);
    fn show_loading(&self, placeholder: &str);
    fn render_profile(&self, card: &ProfileCard);
    /// Show the admin link pointing at `href`, or hide it (`None`).
    fn set_admin_link(&self, href: Option<&str>);
    fn show_error(&self, message: &str);
}

pub struct ProfileModalController<A, V, N> {
    api: Rc<A>,
    view: Option<V>,
    notifier: N,
    messages: Messages,
    admin_url: String,
    state: RefCell<ProfileModalState>,
    generation: Cell<u64>,
}

impl<A: SessionService, V: ProfileModalView, N: Notifier> ProfileModalController<A, V, N> {
    pub fn new(api: Rc<A>, view: Option<V>, notifier: N, config: &ClientConfig) -> Self {
        Self {
            api,
            view,
            notifier,
            messages: config.messages.clone(),
            admin_url: config.endpoints.admin.clone(),
            state: RefCell::new(ProfileModalState::Closed),
            generation: Cell::new(0),
        }
    }

    pub fn state(&self) -> ProfileModalState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// Single entry point for profile triggers.
    ///
    /// Returns a [`Resync`] when the page must be reloaded.
    pub async fn dispatch(&self, trigger: ProfileTrigger) -> Option<Resync> {
        match trigger {
            ProfileTrigger::Open => {
                if let Some(generation) = self.begin_open() {
                    let result = self.api.current_user().await;
                    self.finish_open(generation, result);
                }
                None
            }
            ProfileTrigger::Close => {
                self.close();
                None
            }
            ProfileTrigger::Logout => self.logout().await,
        }
    }

    /// Show the modal in its loading state and return the generation of
    /// this open. `None` if there is no modal on the page or it is already
    /// open.
    pub(crate) fn begin_open(&self) -> Option<u64> {
        let view = self.view.as_ref()?;
        if *self.state.borrow() != ProfileModalState::Closed {
            return None;
        }
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        view.set_visible(true);
        view.set_scroll_locked(true);
        view.set_admin_link(None);
        view.show_loading(&self.messages.profile_loading);
        *self.state.borrow_mut() = ProfileModalState::Open(ProfileContent::Loading);
        Some(generation)
    }

    /// Apply the current-user result of open `generation` if the modal is
    /// still waiting for exactly that open.
    pub(crate) fn finish_open(&self, generation: u64, result: SessionResult) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let waiting = *self.state.borrow() == ProfileModalState::Open(ProfileContent::Loading);
        if !waiting || generation != self.generation.get() {
            log::debug!("profile modal: dropping stale profile result (open #{generation})");
            return;
        }
        let content = match result {
            SessionResult::Ok { user: Some(profile), .. } => {
                let card = ProfileCard::from_profile(&profile, &self.messages);
                view.render_profile(&card);
                view.set_admin_link(card.is_superuser.then_some(self.admin_url.as_str()));
                ProfileContent::Loaded(profile)
            }
            SessionResult::Ok { user: None, .. } => {
                log::warn!("profile modal: /me succeeded without a user");
                view.show_error(&self.messages.profile_load_failed);
                ProfileContent::Failed(self.messages.profile_load_failed.clone())
            }
            SessionResult::Failed { message } => {
                view.show_error(&message);
                ProfileContent::Failed(message)
            }
        };
        *self.state.borrow_mut() = ProfileModalState::Open(content);
    }

    pub fn close(&self) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        if *self.state.borrow() == ProfileModalState::Closed {
            return;
        }
        view.set_visible(false);
        view.set_scroll_locked(false);
        *self.state.borrow_mut() = ProfileModalState::Closed;
    }

    async fn logout(&self) -> Option<Resync> {
        match self.api.logout().await {
            SessionResult::Ok { .. } => Some(Resync::Reload),
            SessionResult::Failed { message } => {
                let text = if message.is_empty() { &self.messages.logout_failed } else { &message };
                self.notifier.notify(text);
                None
            }
        }
    }
}
